//! Plugin registry port.
//!
//! The resolver never discovers plugins itself. It asks a registry which
//! names exist and asks it to load the ones a configuration references.
//! Production uses a filesystem-backed registry; tests use a fixed table.

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

/// Errors a registry can report while loading a single plugin.
#[derive(Debug, Error)]
pub enum PluginLoadError {
    /// The registry has no plugin with this name.
    #[error("Unknown plugin: {0}")]
    NotFound(String),

    /// The plugin directory does not contain a `plugin.toml` file.
    #[error("Missing plugin.toml in {0}")]
    MissingManifest(PathBuf),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse plugin.toml in {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Manifest validation failed for '{name}': {reason}")]
    ValidationFailed { name: String, reason: String },

    /// The manifest declares a different name than its directory.
    #[error("Plugin directory '{dir}' declares name '{declared}'")]
    NameMismatch { dir: String, declared: String },
}

/// Source of plugin handles.
///
/// `known_names` is consulted before `load`, so a well-behaved caller never
/// loads a name outside that set. `load` may still fail for a known name
/// (unreadable manifest, validation errors).
pub trait PluginRegistry {
    /// The loaded representation of a plugin.
    type Handle;

    fn known_names(&self) -> BTreeSet<String>;

    fn load(&self, name: &str) -> Result<Self::Handle, PluginLoadError>;
}

impl<R: PluginRegistry + ?Sized> PluginRegistry for &R {
    type Handle = R::Handle;

    fn known_names(&self) -> BTreeSet<String> {
        (**self).known_names()
    }

    fn load(&self, name: &str) -> Result<Self::Handle, PluginLoadError> {
        (**self).load(name)
    }
}
