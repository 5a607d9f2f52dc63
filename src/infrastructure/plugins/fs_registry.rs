//! Filesystem plugin registry.
//!
//! Discovers plugins under a single directory. Each plugin lives in its own
//! subdirectory and declares itself through a `plugin.toml` manifest:
//!
//! ```text
//! plugins/
//!   csv_reader/
//!     plugin.toml
//!   json_writer/
//!     plugin.toml
//! ```
//!
//! Listing only scans directory names; manifests are read and validated when
//! a plugin is loaded.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::models::plugin::{PluginHandle, PluginManifest};
use crate::domain::ports::plugin_registry::{PluginLoadError, PluginRegistry};

/// Manifest file every plugin directory must contain.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// Registry reading plugins from a directory tree.
#[derive(Debug, Clone)]
pub struct FsPluginRegistry {
    root: PathBuf,
}

impl FsPluginRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn plugin_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl PluginRegistry for FsPluginRegistry {
    type Handle = PluginHandle;

    fn known_names(&self) -> BTreeSet<String> {
        if !self.root.exists() {
            tracing::info!(
                path = %self.root.display(),
                "No plugin directory found, no plugins available"
            );
            return BTreeSet::new();
        }

        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %self.root.display(),
                    error = %e,
                    "Failed to read plugin directory"
                );
                return BTreeSet::new();
            }
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_dir() || !path.join(MANIFEST_FILE).is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.insert(name.to_string());
            }
        }

        tracing::debug!(count = names.len(), path = %self.root.display(), "Plugin discovery complete");
        names
    }

    fn load(&self, name: &str) -> Result<PluginHandle, PluginLoadError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(PluginLoadError::NotFound(name.to_string()));
        }

        let plugin_dir = self.plugin_dir(name);
        if !plugin_dir.is_dir() {
            return Err(PluginLoadError::NotFound(name.to_string()));
        }

        let manifest_path = plugin_dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(PluginLoadError::MissingManifest(plugin_dir));
        }

        let content = std::fs::read_to_string(&manifest_path).map_err(|e| PluginLoadError::Io {
            path: manifest_path.clone(),
            source: e,
        })?;

        let manifest: PluginManifest =
            toml::from_str(&content).map_err(|e| PluginLoadError::TomlParse {
                path: manifest_path.clone(),
                source: e,
            })?;

        manifest
            .validate()
            .map_err(|reason| PluginLoadError::ValidationFailed {
                name: manifest.name.clone(),
                reason,
            })?;

        if manifest.name != name {
            return Err(PluginLoadError::NameMismatch {
                dir: name.to_string(),
                declared: manifest.name,
            });
        }

        tracing::debug!(
            plugin = %manifest.name,
            version = %manifest.version,
            "Loaded plugin manifest"
        );

        Ok(PluginHandle {
            manifest,
            root: plugin_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_plugin(root: &Path, dir: &str, manifest: &PluginManifest) {
        let plugin_dir = root.join(dir);
        std::fs::create_dir_all(&plugin_dir).unwrap();
        std::fs::write(
            plugin_dir.join(MANIFEST_FILE),
            toml::to_string_pretty(manifest).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_missing_root_has_no_plugins() {
        let registry = FsPluginRegistry::new("/tmp/plugconf_test_nonexistent_dir_xyz");
        assert!(registry.known_names().is_empty());
    }

    #[test]
    fn test_known_names_only_lists_dirs_with_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(dir.path(), "csv_reader", &PluginManifest::new("csv_reader"));
        std::fs::create_dir_all(dir.path().join("no_manifest")).unwrap();
        std::fs::write(dir.path().join("stray.toml"), "name = \"stray\"").unwrap();

        let registry = FsPluginRegistry::new(dir.path());
        let names: Vec<String> = registry.known_names().into_iter().collect();
        assert_eq!(names, vec!["csv_reader"]);
    }

    #[test]
    fn test_load_success() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = PluginManifest::new("csv_reader")
            .with_description("Reads CSV input")
            .with_entry("main.py");
        write_plugin(dir.path(), "csv_reader", &manifest);

        let registry = FsPluginRegistry::new(dir.path());
        let handle = registry.load("csv_reader").unwrap();
        assert_eq!(handle.manifest, manifest);
        assert_eq!(handle.root, dir.path().join("csv_reader"));
        assert_eq!(
            handle.entry_path(),
            Some(dir.path().join("csv_reader").join("main.py"))
        );
    }

    #[test]
    fn test_load_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FsPluginRegistry::new(dir.path());
        assert!(matches!(registry.load("ghost"), Err(PluginLoadError::NotFound(_))));
        assert!(matches!(registry.load("../etc"), Err(PluginLoadError::NotFound(_))));
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bare")).unwrap();
        let registry = FsPluginRegistry::new(dir.path());
        assert!(matches!(
            registry.load("bare"),
            Err(PluginLoadError::MissingManifest(_))
        ));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let plugin_dir = dir.path().join("bad");
        std::fs::create_dir_all(&plugin_dir).unwrap();
        std::fs::write(plugin_dir.join(MANIFEST_FILE), "not valid toml {{{{").unwrap();

        let registry = FsPluginRegistry::new(dir.path());
        assert!(matches!(registry.load("bad"), Err(PluginLoadError::TomlParse { .. })));
    }

    #[test]
    fn test_load_name_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(dir.path(), "csv_reader", &PluginManifest::new("something_else"));

        let registry = FsPluginRegistry::new(dir.path());
        match registry.load("csv_reader") {
            Err(PluginLoadError::NameMismatch { dir, declared }) => {
                assert_eq!(dir, "csv_reader");
                assert_eq!(declared, "something_else");
            }
            other => panic!("Expected NameMismatch, got {other:?}"),
        }
    }
}
