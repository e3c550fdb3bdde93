use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on how often a child element may occur.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Bounded(u32),
    Unbounded,
}

impl Cardinality {
    pub const ONE: Cardinality = Cardinality::Bounded(1);
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Bounded(n) => write!(f, "{n}"),
            Cardinality::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Metadata for one structurally significant configuration method: the child
/// role it establishes and how often that child may occur.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct MethodDescriptor {
    /// E.g. `registerReceiver`.
    pub method_name: String,
    /// E.g. `receiver`.
    pub parameter_name: String,
    pub max_occurs: Cardinality,
}

impl MethodDescriptor {
    pub fn new(
        method_name: impl Into<String>,
        parameter_name: impl Into<String>,
        max_occurs: Cardinality,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            parameter_name: parameter_name.into(),
            max_occurs,
        }
    }
}
