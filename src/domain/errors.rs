//! Domain errors for configuration loading and plugin resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort configuration loading.
///
/// None of these are recoverable at the loader layer: they propagate to the
/// caller and loading stops. There is no partially usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document (or a part of it) does not have the expected tree shape.
    #[error("Malformed configuration at '{path}': {reason}")]
    MalformedConfig { path: String, reason: String },

    /// A plugin declaration names a plugin the registry does not know.
    #[error("Plugin not found: '{name}' (referenced at '{path}')")]
    PluginNotFound { name: String, path: String },

    /// The registry knows the plugin but could not load it.
    #[error("Failed to load plugin '{name}': {reason}")]
    PluginLoad { name: String, reason: String },

    /// A required key is absent from the namespace.
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    /// A depth map entry carries a depth of zero.
    #[error("Invalid flatten depth {depth} for '{path}': depth must be at least 1")]
    InvalidDepth { path: String, depth: usize },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

impl ConfigError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_not_found_message_names_plugin_and_path() {
        let err = ConfigError::PluginNotFound {
            name: "missing".to_string(),
            path: "plugins_parse".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'missing'"));
        assert!(msg.contains("plugins_parse"));
    }

    #[test]
    fn test_malformed_helper() {
        let err = ConfigError::malformed("<root>", "expected a mapping");
        assert_eq!(
            err.to_string(),
            "Malformed configuration at '<root>': expected a mapping"
        );
    }
}
