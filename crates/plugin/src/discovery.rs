use flowdoc_api::TypeHandle;

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The whole scan pass aborted on one unresolvable artifact. The
    /// registry turns the artifact id into an exclusion and retries.
    #[error("scan aborted on unresolvable artifact: {artifact}")]
    ScanAborted { artifact: String },
    #[error("discovery failed: {0}")]
    Failed(String),
}

/// One candidate found for a capability: the raw (possibly qualified) name
/// and the handle the introspection seam resolves later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredType {
    pub raw_name: String,
    pub handle: TypeHandle,
    /// Non-public candidates are discovered but never registered.
    pub public: bool,
}

/// Scans an implementation space for candidates implementing a capability
/// interface.
pub trait ComponentDiscovery: Send + Sync {
    fn discover(
        &self,
        capability: &str,
        search_roots: &[String],
        exclude_filters: &[String],
    ) -> Result<Vec<DiscoveredType>, DiscoveryError>;
}
