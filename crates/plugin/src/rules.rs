use flowdoc_api::MethodDescriptor;

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("cannot read method rules resource: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed method rules resource: {0}")]
    Malformed(String),
}

/// Supplies the ordered list of structurally significant configuration
/// methods. A parse failure is fatal to the entire build.
pub trait MethodRulesSource: Send + Sync {
    fn load(&self) -> Result<Vec<MethodDescriptor>, RulesError>;
}
