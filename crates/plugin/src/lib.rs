//! Collaborator seams of the flowdoc core.
//!
//! The core never scans an implementation space, reflects on a type, or
//! parses a rules resource itself; those concerns sit behind the traits in
//! this crate so alternative providers (classpath scanners, static
//! catalogs, test fixtures) can be swapped in.

pub mod discovery;
pub mod docs;
pub mod registration;
pub mod rules;

pub use discovery::{ComponentDiscovery, DiscoveredType, DiscoveryError};
pub use docs::{DocAnnotations, NoDocs};
pub use registration::{IntrospectError, TypeIntrospection, TypeRegistration};
pub use rules::{MethodRulesSource, RulesError};
