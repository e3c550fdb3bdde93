//! Component registry: discovers candidate types per capability, classifies
//! them into groups, and memoizes the resulting immutable context.

use crate::error::{FlowdocError, Result};
use crate::naming;
use crate::overrides::{OverrideTables, SortRules};
use flowdoc_api::{ComponentDescriptor, Group, StructuralRole, TypeHandle};
use flowdoc_plugin::{
    ComponentDiscovery, DiscoveryError, IntrospectError, TypeIntrospection, TypeRegistration,
};
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A scan pass that keeps aborting is abandoned after this many attempts.
const MAX_SCAN_ATTEMPTS: u32 = 100;

/// Implementation-space roots handed to discovery.
pub const SEARCH_ROOTS: &[&str] = &["org.flow", "org.flow.testtool"];

/// Non-fatal findings accumulated during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub subject: String,
    pub detail: String,
}

impl Diagnostic {
    fn new(subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            detail: detail.into(),
        }
    }
}

/// How one primary group is populated.
struct PrimarySpec {
    group_name: &'static str,
    capability: &'static str,
    /// Legacy trailing segment replaced by the group suffix. When set, only
    /// candidates carrying the segment join the group.
    alias: Option<&'static str>,
}

/// How one derived group is filtered out of an already-built primary group.
struct DerivedSpec {
    group_name: &'static str,
    source_group: &'static str,
    alias: &'static str,
}

const PRIMARY_GROUPS: &[PrimarySpec] = &[
    PrimarySpec {
        group_name: "Listeners",
        capability: "org.flow.core.IListener",
        alias: None,
    },
    PrimarySpec {
        group_name: "Senders",
        capability: "org.flow.core.ISender",
        alias: None,
    },
    PrimarySpec {
        group_name: "Pipes",
        capability: "org.flow.core.IPipe",
        alias: None,
    },
    PrimarySpec {
        group_name: "ErrorStorages",
        capability: "org.flow.core.ITransactionalStorage",
        alias: Some("TransactionalStorage"),
    },
    PrimarySpec {
        group_name: "MessageLogs",
        capability: "org.flow.core.ITransactionalStorage",
        alias: Some("TransactionalStorage"),
    },
    PrimarySpec {
        group_name: "ErrorSenders",
        capability: "org.flow.core.ISender",
        alias: Some("Sender"),
    },
];

const DERIVED_GROUPS: &[DerivedSpec] = &[
    DerivedSpec {
        group_name: "InputValidators",
        source_group: "Pipes",
        alias: "ValidatorPipe",
    },
    DerivedSpec {
        group_name: "OutputValidators",
        source_group: "Pipes",
        alias: "ValidatorPipe",
    },
    DerivedSpec {
        group_name: "InputWrappers",
        source_group: "Pipes",
        alias: "WrapperPipe",
    },
    DerivedSpec {
        group_name: "OutputWrappers",
        source_group: "Pipes",
        alias: "WrapperPipe",
    },
];

/// The synthetic infrastructure group appended after discovery.
pub const OTHER_GROUP: &str = "Other";

const OTHER_MEMBERS: &[(&str, &str)] = &[
    ("Configuration", "org.flow.configuration.Configuration"),
    ("Adapter", "org.flow.core.Adapter"),
    ("Receiver", "org.flow.receivers.GenericReceiver"),
    ("Pipeline", "org.flow.core.PipeLine"),
    ("Forward", "org.flow.core.PipeForward"),
    ("Exit", "org.flow.core.PipeLineExit"),
    ("Param", "org.flow.parameters.Parameter"),
    ("Job", "org.flow.scheduler.JobDef"),
    ("Locker", "org.flow.util.Locker"),
    ("Cache", "org.flow.cache.LruCache"),
    ("DirectoryCleaner", "org.flow.util.DirectoryCleaner"),
];

/// The immutable result of one registry build: groups in declaration order,
/// the merged name-deduplicated component index, resolved registrations, and
/// the diagnostics the build produced.
#[derive(Debug)]
pub struct DocContext {
    groups: IndexMap<String, Group>,
    merged: BTreeMap<String, ComponentDescriptor>,
    registrations: BTreeMap<String, TypeRegistration>,
    diagnostics: Vec<Diagnostic>,
}

impl DocContext {
    pub fn groups(&self) -> &IndexMap<String, Group> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// All components across all groups, deduplicated by semantic name.
    pub fn merged(&self) -> &BTreeMap<String, ComponentDescriptor> {
        &self.merged
    }

    pub fn component(&self, semantic_name: &str) -> Option<&ComponentDescriptor> {
        self.merged.get(semantic_name)
    }

    /// The resolved registration backing a component, when introspection
    /// succeeded for its type.
    pub fn registration(&self, fqn: &str) -> Option<&TypeRegistration> {
        self.registrations.get(fqn)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Write-once holder for the context. The first caller runs the build;
/// concurrent callers block on the cell and observe the same result.
#[derive(Default)]
pub struct SharedContext {
    cell: OnceCell<DocContext>,
}

impl SharedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &self,
        build: impl FnOnce() -> Result<DocContext>,
    ) -> Result<&DocContext> {
        self.cell.get_or_try_init(build)
    }

    pub fn get(&self) -> Option<&DocContext> {
        self.cell.get()
    }
}

/// Builds a [`DocContext`] from the discovery and introspection seams.
pub struct ContextBuilder<'a> {
    discovery: &'a dyn ComponentDiscovery,
    introspection: &'a dyn TypeIntrospection,
    tables: &'a OverrideTables,
    search_roots: Vec<String>,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(
        discovery: &'a dyn ComponentDiscovery,
        introspection: &'a dyn TypeIntrospection,
        tables: &'a OverrideTables,
    ) -> Self {
        Self {
            discovery,
            introspection,
            tables,
            search_roots: SEARCH_ROOTS.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn with_search_roots(mut self, roots: Vec<String>) -> Self {
        self.search_roots = roots;
        self
    }

    pub fn build(self) -> Result<DocContext> {
        let mut groups: IndexMap<String, Group> = IndexMap::new();
        let mut diagnostics = Vec::new();
        // Scan-abort handling appends to the filter set for this build only.
        let mut exclude_filters = self.tables.exclude_filters.clone();

        for spec in PRIMARY_GROUPS {
            let candidates =
                self.discover_with_retry(spec.capability, &mut exclude_filters, &mut diagnostics)?;
            let mut group = Group::new(spec.group_name);
            for candidate in candidates {
                if !candidate.public {
                    continue;
                }
                if let Some(alias) = spec.alias {
                    // Alias groups only take members carrying the legacy segment.
                    if !naming::simple_name(&candidate.raw_name).ends_with(alias) {
                        continue;
                    }
                }
                let semantic_name =
                    naming::canonicalize(&candidate.raw_name, spec.group_name, spec.alias);
                let descriptor = ComponentDescriptor::new(semantic_name.clone(), candidate.handle);
                if !group.insert(descriptor) {
                    warn!(group = spec.group_name, name = %semantic_name, "duplicate semantic name dropped");
                    diagnostics.push(Diagnostic::new(
                        semantic_name,
                        format!("duplicate semantic name in group {}", spec.group_name),
                    ));
                }
            }
            debug!(group = spec.group_name, members = group.len(), "group built");
            groups.insert(spec.group_name.to_string(), group);
        }

        for spec in DERIVED_GROUPS {
            let source = groups
                .get(spec.source_group)
                .cloned()
                .unwrap_or_else(|| Group::new(spec.source_group));
            let mut group = Group::new(spec.group_name);
            for member in source.members() {
                if !member.semantic_name.ends_with(spec.alias) {
                    continue;
                }
                let semantic_name =
                    naming::replace_last_part(spec.group_name, &member.semantic_name, spec.alias);
                let descriptor =
                    ComponentDescriptor::new(semantic_name, member.handle.clone());
                group.insert(descriptor);
            }
            groups.insert(spec.group_name.to_string(), group);
        }

        let mut other = Group::new(OTHER_GROUP);
        for (name, fqn) in OTHER_MEMBERS {
            other.insert(ComponentDescriptor::new(*name, TypeHandle::new(*fqn)));
        }
        groups.insert(OTHER_GROUP.to_string(), other);

        self.finish(groups, diagnostics)
    }

    /// Resolve registrations, tag roles, cache method orders, and merge the
    /// groups into the deduplicated index.
    fn finish(
        &self,
        mut groups: IndexMap<String, Group>,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Result<DocContext> {
        let mut registrations: BTreeMap<String, TypeRegistration> = BTreeMap::new();
        let mut dropped: Vec<(String, String)> = Vec::new();

        for group in groups.values() {
            for member in group.members() {
                let fqn = &member.handle.fqn;
                if registrations.contains_key(fqn)
                    || dropped.iter().any(|(d, _)| d == fqn)
                {
                    continue;
                }
                match self.introspection.resolve(&member.handle) {
                    Ok(registration) => {
                        registrations.insert(fqn.clone(), registration);
                    }
                    Err(IntrospectError::UnknownType(detail)) => {
                        diagnostics.push(Diagnostic::new(fqn.clone(), detail.clone()));
                        if group.name == OTHER_GROUP {
                            // Hand-declared entries stay; composition emits
                            // an empty body for them.
                            warn!(fqn = %fqn, "synthetic entry has no loadable type");
                        } else {
                            dropped.push((fqn.clone(), detail));
                        }
                    }
                    Err(IntrospectError::Unresolved { detail, .. }) => {
                        // Kept in its group; composition emits an empty body.
                        warn!(fqn = %fqn, detail = %detail, "introspection unresolved, component kept without registration");
                        diagnostics.push(Diagnostic::new(fqn.clone(), detail));
                    }
                }
            }
        }

        // Candidates whose type could not be loaded at all leave their groups.
        if !dropped.is_empty() {
            for group in groups.values_mut() {
                let mut rebuilt = Group::new(group.name.clone());
                for member in group.members() {
                    if !dropped.iter().any(|(fqn, _)| *fqn == member.handle.fqn) {
                        rebuilt.insert(member.clone());
                    }
                }
                *group = rebuilt;
            }
        }

        // Role tagging and cached method order happen once, here.
        for group in groups.values_mut() {
            let mut tagged = Group::new(group.name.clone());
            for member in group.members() {
                let mut descriptor = member.clone();
                descriptor.role = role_of(&descriptor.semantic_name);
                if let Some(registration) = registrations.get(&descriptor.handle.fqn) {
                    let rules = self.tables.sort_rules.for_role(descriptor.role);
                    descriptor.method_order =
                        sorted_methods(&registration.config_methods, rules);
                }
                tagged.insert(descriptor);
            }
            *group = tagged;
        }

        let mut merged: BTreeMap<String, ComponentDescriptor> = BTreeMap::new();
        for group in groups.values() {
            for member in group.members() {
                if let Some(existing) = merged.get(&member.semantic_name) {
                    if existing != member {
                        warn!(name = %member.semantic_name, "cross-group semantic name collision, first registration wins");
                        diagnostics.push(Diagnostic::new(
                            member.semantic_name.clone(),
                            "cross-group semantic name collision".to_string(),
                        ));
                    }
                    continue;
                }
                merged.insert(member.semantic_name.clone(), member.clone());
            }
        }

        Ok(DocContext {
            groups,
            merged,
            registrations,
            diagnostics,
        })
    }

    /// Run one discovery pass, converting each scan abort into a fresh
    /// exclusion and retrying, up to the attempt bound.
    fn discover_with_retry(
        &self,
        capability: &str,
        exclude_filters: &mut Vec<String>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<flowdoc_plugin::DiscoveredType>> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self
                .discovery
                .discover(capability, &self.search_roots, exclude_filters)
            {
                Ok(candidates) => return Ok(candidates),
                Err(DiscoveryError::ScanAborted { artifact }) => {
                    if attempts >= MAX_SCAN_ATTEMPTS {
                        return Err(FlowdocError::ScanRetriesExhausted {
                            attempts,
                            artifact,
                        });
                    }
                    let exclusion = exclusion_from_artifact(&artifact);
                    warn!(artifact = %artifact, exclusion = %exclusion, "scan aborted, excluding and retrying");
                    diagnostics.push(Diagnostic::new(exclusion.clone(), artifact));
                    exclude_filters.push(exclusion);
                }
                Err(other) => return Err(other.into()),
            }
        }
    }
}

/// Structural role by canonical name, assigned once at registration time.
fn role_of(semantic_name: &str) -> StructuralRole {
    match semantic_name {
        "Adapter" => StructuralRole::TopLevelContainer,
        "Receiver" => StructuralRole::SubContainer,
        "Pipeline" => StructuralRole::PipelineContainer,
        _ => StructuralRole::Default,
    }
}

/// Weighted methods first in descending weight, then the rest
/// lexicographically.
fn sorted_methods(methods: &[String], rules: &[crate::overrides::SortRule]) -> Vec<String> {
    let mut sorted = methods.to_vec();
    sorted.sort_by(|a, b| {
        let wa = SortRules::weight_of(rules, a);
        let wb = SortRules::weight_of(rules, b);
        if wa.is_some() || wb.is_some() {
            wb.unwrap_or(i32::MIN).cmp(&wa.unwrap_or(i32::MIN))
        } else {
            a.cmp(b)
        }
    });
    sorted
}

/// Derive an exclusion pattern from the identifier of the artifact that
/// aborted a scan: drop the archive prefix and extension, rewrite path
/// separators, and widen to the containing namespace.
fn exclusion_from_artifact(artifact: &str) -> String {
    let trimmed = match artifact.find("!/") {
        Some(pos) => &artifact[pos + 2..],
        None => artifact,
    };
    let trimmed = trimmed.strip_suffix(".class").unwrap_or(trimmed);
    let dotted = trimmed.replace('/', "\\.");
    match dotted.rfind("\\.") {
        Some(pos) => format!("{}.*", &dotted[..pos + 2]),
        None => format!("{dotted}.*"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tagging() {
        assert_eq!(role_of("Adapter"), StructuralRole::TopLevelContainer);
        assert_eq!(role_of("Receiver"), StructuralRole::SubContainer);
        assert_eq!(role_of("Pipeline"), StructuralRole::PipelineContainer);
        assert_eq!(role_of("EchoPipe"), StructuralRole::Default);
    }

    #[test]
    fn test_sorted_methods_weights_then_lexicographic() {
        let tables = OverrideTables::default();
        let rules = tables.sort_rules.for_role(StructuralRole::PipelineContainer);
        let methods = vec![
            "setLocker".to_string(),
            "addFoo".to_string(),
            "registerCache".to_string(),
        ];
        let sorted = sorted_methods(&methods, rules);
        assert_eq!(sorted, vec!["registerCache", "setLocker", "addFoo"]);
    }

    #[test]
    fn test_exclusion_from_artifact() {
        assert_eq!(
            exclusion_from_artifact("lib/legacy.jar!/org/flow/extensions/tibco/TibcoSender.class"),
            "org\\.flow\\.extensions\\.tibco\\..*"
        );
        assert_eq!(exclusion_from_artifact("LooseType"), "LooseType.*");
    }
}
