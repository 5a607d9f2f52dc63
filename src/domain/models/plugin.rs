//! Plugin domain models.
//!
//! A plugin declaration is the part of the configuration whose leaves are plugin
//! names. Resolving it against a registry yields a [`PluginTree`] of loaded
//! handles with exactly the same shape. Plugins on disk declare themselves
//! through a [`PluginManifest`].

use std::path::PathBuf;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

/// Resolved mirror of a plugin declaration.
///
/// Keys, key order, and sequence lengths are those of the declaration; only the
/// leaf names are replaced by handles.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginTree<H> {
    /// A single name resolved to its handle.
    Single(H),
    /// A sequence of names, resolved in order.
    List(Vec<H>),
    /// A nested group of declarations.
    Group(Vec<(String, PluginTree<H>)>),
    /// A `null` leaf: the key is declared with no plugin.
    Empty,
}

impl<H> PluginTree<H> {
    /// Look up a direct child of a group.
    pub fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Group(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Follow a sequence of group keys.
    pub fn at<'a, I>(&self, keys: I) -> Option<&Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().try_fold(self, |node, key| node.child(key))
    }

    /// All handles in document order.
    pub fn handles(&self) -> Vec<&H> {
        let mut out = Vec::new();
        self.collect_handles(&mut out);
        out
    }

    fn collect_handles<'a>(&'a self, out: &mut Vec<&'a H>) {
        match self {
            Self::Single(h) => out.push(h),
            Self::List(hs) => out.extend(hs.iter()),
            Self::Group(entries) => {
                for (_, child) in entries {
                    child.collect_handles(out);
                }
            }
            Self::Empty => {}
        }
    }
}

impl<H: Serialize> Serialize for PluginTree<H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(h) => h.serialize(serializer),
            Self::List(hs) => {
                let mut seq = serializer.serialize_seq(Some(hs.len()))?;
                for h in hs {
                    seq.serialize_element(h)?;
                }
                seq.end()
            }
            Self::Group(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Self::Empty => serializer.serialize_none(),
        }
    }
}

/// Manifest a plugin directory declares in `plugin.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin name. Must match the directory name.
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub description: String,

    /// Entry point relative to the plugin directory, if the plugin has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Free-form settings passed through to whoever executes the plugin.
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub settings: toml::Table,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

impl PluginManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            description: String::new(),
            entry: None,
            settings: toml::Table::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    /// Check the manifest for required fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        if self.name.contains(['/', '\\']) {
            return Err(format!("name '{}' cannot contain path separators", self.name));
        }
        if self.version.trim().is_empty() {
            return Err("version cannot be empty".to_string());
        }
        if let Some(entry) = &self.entry {
            if entry.trim().is_empty() {
                return Err("entry cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// A plugin loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginHandle {
    pub manifest: PluginManifest,
    /// Directory the plugin was loaded from.
    pub root: PathBuf,
}

impl PluginHandle {
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// Absolute path of the entry point, if declared.
    pub fn entry_path(&self) -> Option<PathBuf> {
        self.manifest.entry.as_ref().map(|e| self.root.join(e))
    }
}
