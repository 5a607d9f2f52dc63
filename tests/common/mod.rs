//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace with a configuration directory and a plugin directory.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::create_dir_all(dir.path().join("plugins")).expect("create plugin dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn plugin_dir(&self) -> PathBuf {
        self.root().join("plugins")
    }

    /// Write a configuration document relative to the workspace root.
    pub fn write_document(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).expect("write document");
        path
    }

    /// Install a plugin with a minimal valid manifest.
    pub fn add_plugin(&self, name: &str) -> PathBuf {
        self.add_plugin_manifest(
            name,
            &format!("name = \"{name}\"\nversion = \"1.0.0\"\ndescription = \"{name} plugin\"\n"),
        )
    }

    /// Install a plugin with an arbitrary manifest body.
    pub fn add_plugin_manifest(&self, name: &str, manifest: &str) -> PathBuf {
        let dir = self.plugin_dir().join(name);
        fs::create_dir_all(&dir).expect("create plugin");
        fs::write(dir.join("plugin.toml"), manifest).expect("write manifest");
        dir
    }
}
