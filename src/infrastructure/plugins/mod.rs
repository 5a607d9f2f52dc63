//! Plugin registries
//!
//! - `FsPluginRegistry`: plugins discovered from `<dir>/<name>/plugin.toml`
//! - `InMemoryRegistry`: fixed name -> handle table

pub mod fs_registry;
pub mod memory_registry;

pub use fs_registry::{FsPluginRegistry, MANIFEST_FILE};
pub use memory_registry::InMemoryRegistry;
