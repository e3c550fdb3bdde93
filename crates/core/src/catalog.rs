//! Static catalog: a declarative snapshot of the implementation space that
//! backs the discovery, introspection, and documentation seams.
//!
//! Real deployments scan a classpath; the core only ever sees this seam, so
//! a serde-loaded snapshot serves the CLI and the tests alike.

use flowdoc_api::{InlineDoc, TypeHandle};
use flowdoc_plugin::{
    ComponentDiscovery, DiscoveredType, DiscoveryError, DocAnnotations, IntrospectError,
    TypeIntrospection, TypeRegistration,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

/// One type entry in the snapshot.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CatalogType {
    pub fqn: String,
    /// Capability interfaces this type implements.
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub config_methods: Vec<String>,
    #[serde(default)]
    pub scalar_methods: Vec<String>,
    /// Inline documentation per mutator name.
    #[serde(default)]
    pub docs: BTreeMap<String, InlineDoc>,
    /// Simulates a type whose dependent types cannot be loaded.
    #[serde(default)]
    pub unresolved: bool,
    /// Simulates a type that fails to load outright.
    #[serde(default)]
    pub unloadable: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CatalogType {
    fn default() -> Self {
        Self {
            fqn: String::new(),
            capabilities: Vec::new(),
            public: true,
            config_methods: Vec::new(),
            scalar_methods: Vec::new(),
            docs: BTreeMap::new(),
            unresolved: false,
            unloadable: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CatalogFile {
    #[serde(default)]
    pub types: Vec<CatalogType>,
    /// Artifact ids that abort a scan pass, queued per capability. Each
    /// discovery call consumes one until the queue drains.
    #[serde(default)]
    pub scan_aborts: BTreeMap<String, Vec<String>>,
}

pub struct StaticCatalog {
    types: Vec<CatalogType>,
    by_fqn: BTreeMap<String, usize>,
    pending_aborts: Mutex<BTreeMap<String, Vec<String>>>,
}

impl StaticCatalog {
    pub fn new(file: CatalogFile) -> Self {
        let by_fqn = file
            .types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.fqn.clone(), i))
            .collect();
        Self {
            types: file.types,
            by_fqn,
            pending_aborts: Mutex::new(file.scan_aborts),
        }
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file))
    }

    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn entry(&self, fqn: &str) -> Option<&CatalogType> {
        self.by_fqn.get(fqn).map(|&i| &self.types[i])
    }
}

impl ComponentDiscovery for StaticCatalog {
    fn discover(
        &self,
        capability: &str,
        search_roots: &[String],
        exclude_filters: &[String],
    ) -> Result<Vec<DiscoveredType>, DiscoveryError> {
        {
            let mut pending = self.pending_aborts.lock().unwrap();
            if let Some(queue) = pending.get_mut(capability) {
                if !queue.is_empty() {
                    let artifact = queue.remove(0);
                    return Err(DiscoveryError::ScanAborted { artifact });
                }
            }
        }

        let filters = exclude_filters
            .iter()
            .map(|f| Regex::new(&format!("^{f}$")))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DiscoveryError::Failed(format!("bad exclude filter: {e}")))?;

        let mut found = Vec::new();
        for entry in &self.types {
            if !entry.capabilities.iter().any(|c| c == capability) {
                continue;
            }
            if !search_roots.iter().any(|root| {
                entry.fqn == *root || entry.fqn.starts_with(&format!("{root}."))
            }) {
                continue;
            }
            if filters.iter().any(|f| f.is_match(&entry.fqn)) {
                continue;
            }
            found.push(DiscoveredType {
                raw_name: entry.fqn.clone(),
                handle: TypeHandle::new(entry.fqn.clone()),
                public: entry.public,
            });
        }
        Ok(found)
    }
}

impl TypeIntrospection for StaticCatalog {
    fn resolve(&self, handle: &TypeHandle) -> Result<TypeRegistration, IntrospectError> {
        let Some(entry) = self.entry(&handle.fqn) else {
            return Err(IntrospectError::UnknownType(handle.fqn.clone()));
        };
        if entry.unloadable {
            return Err(IntrospectError::UnknownType(entry.fqn.clone()));
        }
        if entry.unresolved {
            return Err(IntrospectError::Unresolved {
                fqn: entry.fqn.clone(),
                detail: "dependent type not loadable".to_string(),
            });
        }
        Ok(TypeRegistration {
            fqn: entry.fqn.clone(),
            config_methods: entry.config_methods.clone(),
            scalar_methods: entry.scalar_methods.clone(),
        })
    }
}

impl DocAnnotations for StaticCatalog {
    fn inline_doc(&self, type_fqn: &str, method_name: &str) -> Option<InlineDoc> {
        self.entry(type_fqn)?.docs.get(method_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(CatalogFile {
            types: vec![
                CatalogType {
                    fqn: "org.flow.pipes.EchoPipe".to_string(),
                    capabilities: vec!["org.flow.core.IPipe".to_string()],
                    scalar_methods: vec!["setName".to_string(), "getName".to_string()],
                    ..Default::default()
                },
                CatalogType {
                    fqn: "org.flow.pipes.MessageSendingPipe".to_string(),
                    capabilities: vec!["org.flow.core.IPipe".to_string()],
                    ..Default::default()
                },
                CatalogType {
                    fqn: "com.vendor.OffRootPipe".to_string(),
                    capabilities: vec!["org.flow.core.IPipe".to_string()],
                    ..Default::default()
                },
            ],
            scan_aborts: BTreeMap::new(),
        })
    }

    #[test]
    fn test_discover_filters_by_capability_root_and_exclusion() {
        let catalog = catalog();
        let found = catalog
            .discover(
                "org.flow.core.IPipe",
                &["org.flow".to_string()],
                &[r"org\.flow\.pipes\.MessageSendingPipe".to_string()],
            )
            .unwrap();
        let names: Vec<_> = found.iter().map(|f| f.raw_name.as_str()).collect();
        assert_eq!(names, vec!["org.flow.pipes.EchoPipe"]);
    }

    #[test]
    fn test_scan_abort_queue_drains() {
        let catalog = StaticCatalog::new(CatalogFile {
            types: Vec::new(),
            scan_aborts: BTreeMap::from([(
                "org.flow.core.IPipe".to_string(),
                vec!["bad.jar!/org/flow/Bad.class".to_string()],
            )]),
        });
        let roots = vec!["org.flow".to_string()];
        let first = catalog.discover("org.flow.core.IPipe", &roots, &[]);
        assert!(matches!(first, Err(DiscoveryError::ScanAborted { .. })));
        let second = catalog.discover("org.flow.core.IPipe", &roots, &[]);
        assert!(second.unwrap().is_empty());
    }

    #[test]
    fn test_from_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"types": [{"fqn": "org.flow.pipes.EchoPipe", "scalar_methods": ["setName", "getName"]}]}"#,
        )
        .unwrap();
        let catalog = StaticCatalog::from_path(&path).unwrap();
        let registration = catalog
            .resolve(&TypeHandle::new("org.flow.pipes.EchoPipe"))
            .unwrap();
        assert_eq!(registration.scalar_methods, vec!["setName", "getName"]);
    }

    #[test]
    fn test_resolve_unknown_type() {
        let err = catalog()
            .resolve(&TypeHandle::new("org.flow.Missing"))
            .unwrap_err();
        assert!(matches!(err, IntrospectError::UnknownType(_)));
    }
}
