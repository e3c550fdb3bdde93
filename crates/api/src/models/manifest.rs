use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One flat lookup record: element name, lowercased kind tag, and the
/// backing implementation type (blank where the element is purely
/// structural).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ManifestRecord {
    pub name: String,
    pub kind_tag: String,
    pub type_fqn: String,
}
