//! Composition behavior: the emitted XSD, child ordering, cardinalities.

mod common;

use common::{engine_for, entry, framework_engine, with_config, with_scalars, I_PIPE, I_SENDER};
use flowdoc_core::overrides::OverrideTables;
use flowdoc_core::xml::is_well_formed;

/// The complex type section for one name, from its opening tag to the next
/// complex type (or the end of the document).
fn type_section<'a>(schema: &'a str, name: &str) -> &'a str {
    let open = format!("<xs:complexType name=\"{name}\"");
    let start = schema.find(&open).unwrap_or_else(|| panic!("no {name}"));
    let rest = &schema[start + open.len()..];
    let end = rest.find("<xs:complexType name=").unwrap_or(rest.len());
    &rest[..end]
}

#[test]
fn minimal_catalog_yields_suffixed_types_with_required_name() {
    // One sender, one pipe, no overrides in play.
    let file = flowdoc_core::catalog::CatalogFile {
        types: vec![
            with_scalars(entry("org.flow.senders.FooSender", &[I_SENDER]), &["setName", "getName"]),
            with_scalars(entry("org.flow.pipes.FooPipe", &[I_PIPE]), &["setName", "getName"]),
        ],
        scan_aborts: Default::default(),
    };
    let engine = engine_for(file, OverrideTables::default());
    let schema = engine.schema().unwrap();

    for name in ["FooSenderType", "FooPipeType"] {
        let section = type_section(&schema, name);
        assert!(
            section.contains("<xs:attribute name=\"name\" type=\"xs:string\" use=\"required\"/>"),
            "{name} should require a name attribute"
        );
    }
}

#[test]
fn composition_is_idempotent() {
    let engine = framework_engine();
    let first = engine.schema().unwrap();
    let second = engine.schema().unwrap();
    assert_eq!(first, second);

    // A second engine over the same snapshot agrees byte for byte.
    let other = framework_engine();
    assert_eq!(first, other.schema().unwrap());
}

#[test]
fn schema_is_well_formed() {
    let engine = framework_engine();
    assert!(is_well_formed(&engine.schema().unwrap()));
}

#[test]
fn prologue_declares_top_level_elements() {
    let engine = framework_engine();
    let schema = engine.schema().unwrap();
    assert!(schema.contains("<xs:element name=\"Configuration\" type=\"ConfigurationType\"/>"));
    assert!(schema.contains("<xs:element name=\"Module\" type=\"ModuleType\"/>"));
    assert!(schema.contains("<xs:element name=\"Adapter\" type=\"AdapterType\"/>"));
    let module = type_section(&schema, "ModuleType");
    assert!(module.contains("maxOccurs=\"unbounded\""));
    assert!(module.contains("<xs:element name=\"Job\" type=\"JobType\" minOccurs=\"0\"/>"));
}

#[test]
fn pipeline_children_follow_weight_order() {
    // registerCache (100) before setLocker (90) before the unweighted rest.
    let engine = framework_engine();
    let context = engine.context().unwrap();
    let pipeline = context.component("Pipeline").unwrap();
    assert_eq!(
        pipeline.method_order,
        vec![
            "registerCache",
            "setLocker",
            "setInputValidator",
            "addPipe",
            "registerPipeLineExit",
        ]
    );

    let schema = engine.schema().unwrap();
    let section = type_section(&schema, "PipelineType");
    let cache = section.find("<xs:element name=\"Cache\"").unwrap();
    let locker = section.find("<xs:element name=\"Locker\"").unwrap();
    let pipes = section.find("<xs:choice minOccurs=\"0\" maxOccurs=\"unbounded\"").unwrap();
    assert!(cache < locker, "Cache child must precede Locker");
    assert!(locker < pipes, "Locker child must precede the pipe choice");
}

#[test]
fn unbounded_override_beats_declared_cardinality() {
    // The owner sits in the unbounded-override set while the matched rule
    // (setSender) declares maxOccurs 1.
    let file = flowdoc_core::catalog::CatalogFile {
        types: vec![
            with_config(
                with_scalars(entry("org.flow.senders.ParallelSenders", &[I_SENDER]), &["setName", "getName"]),
                &["setSender"],
            ),
            with_scalars(entry("org.flow.senders.RelaySender", &[I_SENDER]), &["setName", "getName"]),
        ],
        scan_aborts: Default::default(),
    };
    let mut tables = OverrideTables::default();
    tables
        .max_occurs_to_unbounded
        .insert("ParallelSendersSender".to_string());

    let engine = engine_for(file, tables);
    let schema = engine.schema().unwrap();
    let section = type_section(&schema, "ParallelSendersSenderType");
    assert!(section.contains("<xs:choice minOccurs=\"0\" maxOccurs=\"unbounded\">"));
}

#[test]
fn sender_choice_without_override_keeps_declared_cardinality() {
    let engine = framework_engine();
    let schema = engine.schema().unwrap();
    // setSender is a set-verb rule: maxOccurs 1 is left implicit.
    let section = type_section(&schema, "SenderPipeType");
    assert!(section.contains("<xs:choice minOccurs=\"0\">"));
    assert!(!section.contains("maxOccurs=\"unbounded\""));
}

#[test]
fn listener_sender_choice_is_suppressed() {
    let engine = framework_engine();
    let schema = engine.schema().unwrap();
    // JavaListener registers a sender, but the (Listener, Sender) pair is a
    // legacy construction and never reaches the schema.
    let section = type_section(&schema, "JavaListenerType");
    assert!(!section.contains("<xs:choice"));
}

#[test]
fn register_pipe_line_is_forced_to_one() {
    let engine = framework_engine();
    let schema = engine.schema().unwrap();
    let section = type_section(&schema, "AdapterType");
    // register* would be unbounded; the override pins the pipeline to one.
    assert!(section.contains("<xs:element name=\"Pipeline\" type=\"PipelineType\" minOccurs=\"0\"/>"));
    // The receiver reference keeps its declared unbounded cardinality.
    assert!(section.contains(
        "<xs:element name=\"Receiver\" type=\"ReceiverType\" minOccurs=\"0\" maxOccurs=\"unbounded\"/>"
    ));
}

#[test]
fn receiver_choices_cover_the_polymorphic_slots() {
    let engine = framework_engine();
    let schema = engine.schema().unwrap();
    let section = type_section(&schema, "ReceiverType");
    assert!(section.contains("<xs:element name=\"JavaListener\" type=\"JavaListenerType\""));
    assert!(section.contains("<xs:element name=\"JdbcErrorStorage\" type=\"JdbcErrorStorageType\""));
    assert!(section.contains("<xs:element name=\"FileErrorSender\" type=\"FileErrorSenderType\""));
}

#[test]
fn inline_docs_become_annotations() {
    let mut file = common::framework_catalog();
    for t in &mut file.types {
        if t.fqn == "org.flow.senders.FileSender" {
            t.docs.insert(
                "setDirectory".to_string(),
                flowdoc_api::InlineDoc::with_default("Directory to write to", "/tmp"),
            );
        }
    }
    let engine = engine_for(file, OverrideTables::default());
    let schema = engine.schema().unwrap();
    let section = type_section(&schema, "FileSenderType");
    assert!(section
        .contains("<xs:documentation>Directory to write to (default: /tmp)</xs:documentation>"));
}

#[test]
fn copied_properties_appear_on_the_partner() {
    let engine = framework_engine();
    let schema = engine.schema().unwrap();
    // FilePipe unions FileSender's attribute set.
    let section = type_section(&schema, "FilePipeType");
    assert!(section.contains("<xs:attribute name=\"directory\""));
    assert!(section.contains("<xs:attribute name=\"createDirectory\""));
}

#[test]
fn validator_variants_lose_the_name_attribute() {
    let engine = framework_engine();
    let schema = engine.schema().unwrap();
    // As a plain pipe the validator keeps its name attribute...
    assert!(type_section(&schema, "XmlValidatorPipeType").contains("name=\"name\""));
    // ...but the input-validator variant suppresses it.
    let section = type_section(&schema, "XmlInputValidatorType");
    assert!(!section.contains("name=\"name\""));
    assert!(section.contains("<xs:attribute name=\"schema\""));
}

#[test]
fn unresolved_component_contributes_empty_type() {
    let mut file = common::framework_catalog();
    let mut partial = entry("org.flow.pipes.PartialPipe", &[I_PIPE]);
    partial.unresolved = true;
    file.types.push(partial);

    let engine = engine_for(file, OverrideTables::default());
    let schema = engine.schema().unwrap();
    assert!(schema.contains("<xs:complexType name=\"PartialPipeType\"/>"));
}
