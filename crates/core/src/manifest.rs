//! Flat lookup manifest: one record per component, reusing the group map.

use crate::naming;
use crate::registry::{DocContext, OTHER_GROUP};
use crate::xml::XmlElement;
use flowdoc_api::ManifestRecord;

/// Designated synthetic entry that keeps its backing type in the manifest.
const KEEP_TYPE_IN_OTHER: &str = "Receiver";

/// One record per component, groups in declaration order, members in name
/// order.
pub fn export(context: &DocContext) -> Vec<ManifestRecord> {
    let mut records = Vec::new();
    for group in context.groups().values() {
        for member in group.members() {
            let record = if group.name == OTHER_GROUP {
                // Synthetic entries are keyed by their own name, and all but
                // one are purely structural.
                let type_fqn = if member.semantic_name == KEEP_TYPE_IN_OTHER {
                    member.handle.fqn.clone()
                } else {
                    String::new()
                };
                ManifestRecord {
                    name: member.semantic_name.clone(),
                    kind_tag: naming::lower_initial(&member.semantic_name),
                    type_fqn,
                }
            } else {
                ManifestRecord {
                    name: member.semantic_name.clone(),
                    kind_tag: naming::lower_initial(&naming::singular_suffix(&group.name)),
                    type_fqn: member.handle.fqn.clone(),
                }
            };
            records.push(record);
        }
    }
    records
}

/// Render the records as the `<Elements>` lookup document.
pub fn to_xml(records: &[ManifestRecord]) -> String {
    let mut elements = XmlElement::new("Elements");
    for record in records {
        elements.add_child(
            XmlElement::new("Element")
                .child(XmlElement::new("Name").text(&record.name))
                .child(XmlElement::new("Type").text(&record.kind_tag))
                .child(XmlElement::new("ClassName").text(&record.type_fqn)),
        );
    }
    elements.to_document()
}

pub fn export_xml(context: &DocContext) -> String {
    to_xml(&export(context))
}
