use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inline documentation attached to a configuration mutator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct InlineDoc {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl InlineDoc {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default_value: None,
        }
    }

    pub fn with_default(text: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default_value: Some(default_value.into()),
        }
    }
}

/// One documented scalar attribute of a component type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct PropertyDescriptor {
    pub name: String,
    /// Fqn of the type whose registration contributed this property.
    pub declaring_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<InlineDoc>,
}
