use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A published document plus the content type it should be served with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Artifact {
    pub content_type: String,
    pub body: String,
}

impl Artifact {
    pub fn xml(body: impl Into<String>) -> Self {
        Self {
            content_type: "application/xml".to_string(),
            body: body.into(),
        }
    }

    pub fn json(body: impl Into<String>) -> Self {
        Self {
            content_type: "application/json".to_string(),
            body: body.into(),
        }
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self {
            content_type: "text/html".to_string(),
            body: body.into(),
        }
    }
}
