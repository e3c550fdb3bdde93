//! Schema composer: turns the built context plus the method rules into the
//! structural XSD document.
//!
//! Emission order is fully determined: components in semantic-name order,
//! children in each component's cached method order, members of a choice in
//! group order. Composing twice over the same context is byte-identical.

use crate::naming;
use crate::overrides::OverrideTables;
use crate::properties;
use crate::registry::DocContext;
use crate::xml::XmlElement;
use flowdoc_api::{Cardinality, ComponentDescriptor, MethodDescriptor};
use flowdoc_plugin::DocAnnotations;

const XS_SCHEMA_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Compose the complete structural schema for one built context.
pub fn compose(
    context: &DocContext,
    methods: &[MethodDescriptor],
    tables: &OverrideTables,
    docs: &dyn DocAnnotations,
) -> String {
    let mut schema = XmlElement::new("xs:schema")
        .attr("xmlns:xs", XS_SCHEMA_NS)
        .attr("elementFormDefault", "qualified");

    schema.add_child(top_level_element("Configuration"));
    schema.add_child(top_level_element("Module"));
    schema.add_child(top_level_element("Adapter"));
    schema.add_child(module_type());

    for component in context.merged().values() {
        schema.add_child(component_type(component, context, methods, tables, docs));
    }

    schema.to_document()
}

fn top_level_element(name: &str) -> XmlElement {
    XmlElement::new("xs:element")
        .attr("name", name)
        .attr("type", format!("{name}Type"))
}

/// A module is a grouping file: any number of adapters and jobs.
fn module_type() -> XmlElement {
    let mut choice = XmlElement::new("xs:choice")
        .attr("minOccurs", "0")
        .attr("maxOccurs", "unbounded");
    choice.add_child(child_element("Adapter", Cardinality::ONE));
    choice.add_child(child_element("Job", Cardinality::ONE));
    XmlElement::new("xs:complexType")
        .attr("name", "ModuleType")
        .child(choice)
}

fn component_type(
    component: &ComponentDescriptor,
    context: &DocContext,
    methods: &[MethodDescriptor],
    tables: &OverrideTables,
    docs: &dyn DocAnnotations,
) -> XmlElement {
    let mut complex_type =
        XmlElement::new("xs:complexType").attr("name", format!("{}Type", component.semantic_name));

    let children = child_nodes(component, context, methods, tables);
    if !children.is_empty() {
        let mut sequence = XmlElement::new("xs:sequence");
        for child in children {
            sequence.add_child(child);
        }
        complex_type.add_child(sequence);
    }

    for property in properties::extract(component, context, docs, tables).values() {
        complex_type.add_child(attribute(property));
    }

    complex_type
}

/// The ordered child nodes of one component: a choice node per method whose
/// parameter names a group, a direct reference per method whose parameter
/// names a known component.
fn child_nodes(
    component: &ComponentDescriptor,
    context: &DocContext,
    methods: &[MethodDescriptor],
    tables: &OverrideTables,
) -> Vec<XmlElement> {
    let mut children = Vec::new();
    for method_name in &component.method_order {
        let Some(descriptor) = methods.iter().find(|m| &m.method_name == method_name) else {
            continue;
        };
        let child_name = naming::upper_camel(&descriptor.parameter_name);
        if let Some(group) = context.group(&format!("{child_name}s")) {
            if tables.is_ignored(&component.semantic_name, &child_name) {
                continue;
            }
            let max_occurs = if tables
                .max_occurs_to_unbounded
                .contains(&component.semantic_name)
            {
                Cardinality::Unbounded
            } else {
                descriptor.max_occurs
            };
            let mut choice = XmlElement::new("xs:choice").attr("minOccurs", "0");
            add_max_occurs(&mut choice, max_occurs);
            for member in group.members() {
                choice.add_child(child_element(&member.semantic_name, Cardinality::ONE));
            }
            children.push(choice);
        } else if context.component(&child_name).is_some() {
            let max_occurs = if tables.max_occurs_to_one.contains(method_name) {
                Cardinality::ONE
            } else {
                descriptor.max_occurs
            };
            children.push(child_element(&child_name, max_occurs));
        }
    }
    children
}

fn child_element(name: &str, max_occurs: Cardinality) -> XmlElement {
    let mut element = XmlElement::new("xs:element")
        .attr("name", name)
        .attr("type", format!("{name}Type"))
        .attr("minOccurs", "0");
    add_max_occurs(&mut element, max_occurs);
    element
}

/// `maxOccurs` defaults to 1 in a schema, so an exact 1 is left implicit.
fn add_max_occurs(element: &mut XmlElement, max_occurs: Cardinality) {
    match max_occurs {
        Cardinality::Unbounded => element.add_attribute("maxOccurs", "unbounded"),
        Cardinality::Bounded(1) => {}
        Cardinality::Bounded(n) => element.add_attribute("maxOccurs", n.to_string()),
    }
}

fn attribute(property: &flowdoc_api::PropertyDescriptor) -> XmlElement {
    let mut attribute = XmlElement::new("xs:attribute")
        .attr("name", &property.name)
        .attr("type", "xs:string");
    if property.name == "name" {
        attribute.add_attribute("use", "required");
    }
    if let Some(doc) = &property.doc {
        let text = match &doc.default_value {
            Some(default) => format!("{} (default: {default})", doc.text),
            None => doc.text.clone(),
        };
        attribute.add_child(
            XmlElement::new("xs:annotation").child(XmlElement::new("xs:documentation").text(text)),
        );
    }
    attribute
}
