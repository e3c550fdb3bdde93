pub mod error;
pub mod logging;

pub mod boundary;
pub mod catalog;
pub mod compose;
pub mod engine;
pub mod manifest;
pub mod naming;
pub mod overrides;
pub mod properties;
pub mod registry;
pub mod rules;
pub mod xml;

pub use error::{FlowdocError, Result};
