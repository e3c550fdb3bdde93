pub mod artifact;
pub mod component;
pub mod manifest;
pub mod method;
pub mod property;

pub use artifact::*;
pub use component::*;
pub use manifest::*;
pub use method::*;
pub use property::*;
