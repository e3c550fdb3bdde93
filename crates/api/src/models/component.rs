use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Structural role of a component within a configuration tree.
///
/// Assigned once when the component is registered; composition never infers
/// the role from the name again.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StructuralRole {
    /// The outermost assembly container (one per deployable unit).
    TopLevelContainer,
    /// An inbound-side container nested directly under the top level.
    SubContainer,
    /// The container that holds the ordered processing pipeline.
    PipelineContainer,
    #[default]
    Default,
}

/// Opaque handle to an implementation type in the scanned space.
///
/// The core never reflects on this directly; resolution goes through the
/// introspection seam.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct TypeHandle {
    pub fqn: String,
}

impl TypeHandle {
    pub fn new(fqn: impl Into<String>) -> Self {
        Self { fqn: fqn.into() }
    }
}

/// One registered component: the canonical schema name plus the backing
/// implementation type.
///
/// Descriptors are immutable once built. `method_order` is the pre-sorted
/// declared-method order for this component under its role's weight rules,
/// computed at registration time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ComponentDescriptor {
    pub semantic_name: String,
    pub handle: TypeHandle,
    pub role: StructuralRole,
    pub method_order: Vec<String>,
}

impl ComponentDescriptor {
    pub fn new(semantic_name: impl Into<String>, handle: TypeHandle) -> Self {
        Self {
            semantic_name: semantic_name.into(),
            handle,
            role: StructuralRole::Default,
            method_order: Vec::new(),
        }
    }
}

impl PartialOrd for ComponentDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semantic_name.cmp(&other.semantic_name)
    }
}

/// One capability role and its ordered, duplicate-free member set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Group {
    pub name: String,
    members: Vec<ComponentDescriptor>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Insert keeping members sorted by semantic name. The first descriptor
    /// registered under a name wins; later duplicates are rejected.
    pub fn insert(&mut self, descriptor: ComponentDescriptor) -> bool {
        match self
            .members
            .binary_search_by(|m| m.semantic_name.cmp(&descriptor.semantic_name))
        {
            Ok(_) => false,
            Err(pos) => {
                self.members.insert(pos, descriptor);
                true
            }
        }
    }

    pub fn members(&self) -> &[ComponentDescriptor] {
        &self.members
    }

    pub fn contains(&self, semantic_name: &str) -> bool {
        self.members
            .binary_search_by(|m| m.semantic_name.as_str().cmp(semantic_name))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
