use flowdoc_api::InlineDoc;

/// Looks up inline documentation attached to a configuration mutator.
/// Absence is normal and yields an attribute without documentation.
pub trait DocAnnotations: Send + Sync {
    fn inline_doc(&self, type_fqn: &str, method_name: &str) -> Option<InlineDoc>;
}

/// Provider with no documentation at all.
#[derive(Debug, Default)]
pub struct NoDocs;

impl DocAnnotations for NoDocs {
    fn inline_doc(&self, _type_fqn: &str, _method_name: &str) -> Option<InlineDoc> {
        None
    }
}
