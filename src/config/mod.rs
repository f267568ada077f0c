//! Shortcut configuration layers
//!
//! - **document**: the YAML model of one layer
//! - **validate**: rules a layer must pass before it is used
//! - **merge**: sanitizing a layer and patching one layer onto another
//! - **loader**: discovery, concurrent reads and the full load pipeline

pub mod document;
pub mod loader;
pub mod merge;
pub mod validate;

// Re-export commonly used types
pub use loader::ConfigLoader;
