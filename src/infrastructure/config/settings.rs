use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::errors::ConfigResult;
use crate::domain::models::depth::DepthMap;
use crate::domain::models::namespace::CollisionPolicy;
use crate::infrastructure::logging::LogConfig;
use crate::services::flattener::DEFAULT_SEPARATOR;
use crate::services::plugin_resolver::DEFAULT_PLUGIN_PATH;

/// Settings controlling how configuration documents are loaded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct LoaderSettings {
    /// Configuration document to load
    #[serde(default = "default_document")]
    pub document: PathBuf,

    /// Directory bare document file names are resolved against
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Directory holding one subdirectory per plugin
    #[serde(default = "default_plugin_dir")]
    pub plugin_dir: PathBuf,

    /// Namespace path holding plugin declarations
    #[serde(default = "default_plugin_path")]
    pub plugin_path: String,

    /// Separator between path segments
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Policy for two keys flattening to the same path
    #[serde(default)]
    pub collision: CollisionPolicy,

    /// Maximum flatten depth per top-level key
    #[serde(default = "default_depths")]
    pub depths: BTreeMap<String, usize>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,
}

fn default_document() -> PathBuf {
    PathBuf::from("config.yaml")
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_plugin_dir() -> PathBuf {
    PathBuf::from("plugins")
}

fn default_plugin_path() -> String {
    DEFAULT_PLUGIN_PATH.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Plugin declarations are handed to the resolver unflattened.
fn default_depths() -> BTreeMap<String, usize> {
    BTreeMap::from([(DEFAULT_PLUGIN_PATH.to_string(), 1)])
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            document: default_document(),
            base_dir: default_base_dir(),
            plugin_dir: default_plugin_dir(),
            plugin_path: default_plugin_path(),
            separator: default_separator(),
            collision: CollisionPolicy::default(),
            depths: default_depths(),
            logging: LogConfig::default(),
        }
    }
}

impl LoaderSettings {
    /// Depth table for the flattener.
    pub fn depth_map(&self) -> ConfigResult<DepthMap> {
        DepthMap::from_entries(self.depths.iter().map(|(k, v)| (k.clone(), *v)))
    }
}
