//! Port trait definitions (Hexagonal Architecture)
//!
//! - PluginRegistry: known plugin names and name -> handle loading
//! - DocumentReader: source of the parsed configuration tree
//!
//! Services depend only on these traits, so the resolver and loader can be
//! exercised with in-memory fakes.

pub mod document_reader;
pub mod plugin_registry;

pub use document_reader::DocumentReader;
pub use plugin_registry::{PluginLoadError, PluginRegistry};
