//! Serving boundary: published artifacts keyed by opaque path strings.
//!
//! Transport is someone else's concern; this is the in-process dispatch an
//! outer layer calls with a request path.

use flowdoc_api::Artifact;

pub const INDEX_PATH: &str = "/flowdoc";
pub const SCHEMA_PATH: &str = "/flowdoc/flowdoc.xsd";
pub const LOOKUP_PATH: &str = "/flowdoc/lookup.xml";
pub const DOC_JSON_PATH: &str = "/flowdoc/flowdoc.json";

const NOT_FOUND_BODY: &str = "Not found";

/// Holds the rendered artifacts for one build. The JSON documentation
/// manifest is produced by a sibling extractor and handed in pre-rendered.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    schema: String,
    lookup: String,
    doc_json: String,
}

impl ArtifactStore {
    pub fn new(schema: String, lookup: String, doc_json: String) -> Self {
        Self {
            schema,
            lookup,
            doc_json,
        }
    }

    /// Resolve one request path. Unknown paths get a fixed not-found body,
    /// never an error.
    pub fn get(&self, path: &str) -> Artifact {
        match path {
            SCHEMA_PATH => Artifact::xml(self.schema.clone()),
            LOOKUP_PATH => Artifact::xml(self.lookup.clone()),
            DOC_JSON_PATH => Artifact::json(self.doc_json.clone()),
            INDEX_PATH => Artifact::html(index_body()),
            _ => Artifact::html(NOT_FOUND_BODY),
        }
    }
}

fn index_body() -> String {
    format!(
        "<html>\n\
         \x20 <a href=\"{SCHEMA_PATH}\">flowdoc.xsd</a><br/>\n\
         \x20 <a href=\"{LOOKUP_PATH}\">lookup.xml</a><br/>\n\
         \x20 <a href=\"{DOC_JSON_PATH}\">flowdoc.json</a><br/>\n\
         </html>"
    )
}
