//! Derives the documented scalar attribute set of one component type from
//! its registered scalar methods.

use crate::overrides::OverrideTables;
use crate::registry::DocContext;
use flowdoc_api::{ComponentDescriptor, PropertyDescriptor};
use flowdoc_plugin::{DocAnnotations, TypeRegistration};
use std::collections::BTreeMap;

/// Property name derived from a verb-prefixed method: `setTimeout` ->
/// `timeout`. Returns `None` when the method does not carry the verb or has
/// nothing after it.
fn property_name(method: &str, verb: &str) -> Option<String> {
    let rest = method.strip_prefix(verb)?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().collect::<String>() + chars.as_str())
}

/// Pair mutators with accessors over one registration. A mutator without a
/// matching `get`/`is` accessor is dropped unless it carries inline
/// documentation.
fn raw_properties(
    registration: &TypeRegistration,
    docs: &dyn DocAnnotations,
) -> BTreeMap<String, PropertyDescriptor> {
    let mut mutators: BTreeMap<String, String> = BTreeMap::new();
    let mut accessors: BTreeMap<String, ()> = BTreeMap::new();

    for method in &registration.scalar_methods {
        if let Some(name) = property_name(method, "set") {
            mutators.entry(name).or_insert_with(|| method.clone());
        } else if let Some(name) = property_name(method, "get") {
            accessors.insert(name, ());
        } else if let Some(name) = property_name(method, "is") {
            accessors.insert(name, ());
        }
    }

    let mut properties = BTreeMap::new();
    for (name, mutator) in mutators {
        let doc = docs.inline_doc(&registration.fqn, &mutator);
        if !accessors.contains_key(&name) && doc.is_none() {
            continue;
        }
        properties.insert(
            name.clone(),
            PropertyDescriptor {
                name,
                declaring_type: registration.fqn.clone(),
                doc,
            },
        );
    }
    properties
}

/// Extract the ordered attribute set for `owner`, applying the cross-type
/// property-copy pairs and the name-attribute exclusion policy.
///
/// An owner whose registration never resolved yields an empty set.
pub fn extract(
    owner: &ComponentDescriptor,
    context: &DocContext,
    docs: &dyn DocAnnotations,
    tables: &OverrideTables,
) -> BTreeMap<String, PropertyDescriptor> {
    let mut properties = match context.registration(&owner.handle.fqn) {
        Some(registration) => raw_properties(registration, docs),
        None => BTreeMap::new(),
    };

    if let Some(partner_name) = tables.copy_partner(&owner.semantic_name) {
        if let Some(partner) = context.component(partner_name) {
            if let Some(registration) = context.registration(&partner.handle.fqn) {
                // Partner entries overwrite the owner's on name conflicts.
                properties.extend(raw_properties(registration, docs));
            }
        }
    }

    if tables.suppresses_name_attribute(&owner.semantic_name) {
        properties.remove("name");
    }

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdoc_api::InlineDoc;

    struct FixtureDocs;

    impl DocAnnotations for FixtureDocs {
        fn inline_doc(&self, _type_fqn: &str, method_name: &str) -> Option<InlineDoc> {
            match method_name {
                "setTimeout" => Some(InlineDoc::with_default("Timeout in seconds", "30")),
                "setSoapAction" => Some(InlineDoc::new("SOAP action to invoke")),
                _ => None,
            }
        }
    }

    fn registration(methods: &[&str]) -> TypeRegistration {
        TypeRegistration {
            fqn: "org.flow.pipes.EchoPipe".to_string(),
            config_methods: Vec::new(),
            scalar_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_mutator_paired_with_get_accessor() {
        let reg = registration(&["setName", "getName"]);
        let props = raw_properties(&reg, &FixtureDocs);
        assert!(props.contains_key("name"));
    }

    #[test]
    fn test_mutator_paired_with_is_accessor() {
        let reg = registration(&["setActive", "isActive"]);
        let props = raw_properties(&reg, &FixtureDocs);
        assert!(props.contains_key("active"));
    }

    #[test]
    fn test_unpaired_mutator_dropped() {
        let reg = registration(&["setOrphan"]);
        let props = raw_properties(&reg, &FixtureDocs);
        assert!(props.is_empty());
    }

    #[test]
    fn test_documented_unpaired_mutator_retained() {
        let reg = registration(&["setSoapAction"]);
        let props = raw_properties(&reg, &FixtureDocs);
        let prop = props.get("soapAction").expect("retained via inline doc");
        assert_eq!(prop.doc.as_ref().unwrap().text, "SOAP action to invoke");
    }

    #[test]
    fn test_doc_default_value_carried() {
        let reg = registration(&["setTimeout", "getTimeout"]);
        let props = raw_properties(&reg, &FixtureDocs);
        let doc = props["timeout"].doc.as_ref().unwrap();
        assert_eq!(doc.default_value.as_deref(), Some("30"));
    }

    #[test]
    fn test_verb_only_methods_ignored() {
        let reg = registration(&["set", "get", "is", "setX", "getX"]);
        let props = raw_properties(&reg, &FixtureDocs);
        assert_eq!(props.len(), 1);
        assert!(props.contains_key("x"));
    }

    #[test]
    fn test_output_ordered_by_name() {
        let reg = registration(&["setZeta", "getZeta", "setAlpha", "getAlpha"]);
        let props = raw_properties(&reg, &FixtureDocs);
        let names: Vec<_> = props.keys().cloned().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
