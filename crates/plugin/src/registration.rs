use flowdoc_api::TypeHandle;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum IntrospectError {
    /// The type exists but a dependent type could not be loaded. The
    /// component is skipped; the rest of the build proceeds.
    #[error("unresolved dependent type while introspecting {fqn}: {detail}")]
    Unresolved { fqn: String, detail: String },
    #[error("unknown type: {0}")]
    UnknownType(String),
}

/// What one component type registers about itself.
///
/// Each type supplies its own ordered method lists; the core never reflects
/// on implementation types directly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRegistration {
    pub fqn: String,
    /// Structurally significant candidates, matched against the method
    /// rules by exact name during composition.
    #[serde(default)]
    pub config_methods: Vec<String>,
    /// Scalar accessors and mutators (`setX`/`getX`/`isX`), the raw input
    /// to property extraction.
    #[serde(default)]
    pub scalar_methods: Vec<String>,
}

/// The single descriptor-provider abstraction: resolves a handle into the
/// type's registration.
pub trait TypeIntrospection: Send + Sync {
    fn resolve(&self, handle: &TypeHandle) -> Result<TypeRegistration, IntrospectError>;
}
