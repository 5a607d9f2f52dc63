//! Configuration loading service.
//!
//! The single entry point callers use: read a document, flatten it under a
//! depth map, resolve the plugin branch, and hand back a [`ResolvedConfig`].

use std::path::Path;

use crate::domain::errors::ConfigResult;
use crate::domain::models::depth::DepthMap;
use crate::domain::models::namespace::CollisionPolicy;
use crate::domain::models::resolved::ResolvedConfig;
use crate::domain::models::tree::ConfigNode;
use crate::domain::ports::document_reader::DocumentReader;
use crate::domain::ports::plugin_registry::PluginRegistry;
use crate::services::flattener::{Flattener, DEFAULT_SEPARATOR};
use crate::services::plugin_resolver::{PluginResolver, DEFAULT_PLUGIN_PATH};

/// Loads fully resolved configurations.
pub struct ConfigService<D, R> {
    reader: D,
    registry: R,
    plugin_path: String,
    separator: String,
    collision: CollisionPolicy,
}

impl<D, R> ConfigService<D, R>
where
    D: DocumentReader,
    R: PluginRegistry,
{
    pub fn new(reader: D, registry: R) -> Self {
        Self {
            reader,
            registry,
            plugin_path: DEFAULT_PLUGIN_PATH.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            collision: CollisionPolicy::default(),
        }
    }

    /// Namespace path holding plugin declarations.
    pub fn with_plugin_path(mut self, path: impl Into<String>) -> Self {
        self.plugin_path = path.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Read `path` and resolve it.
    pub fn load(&self, path: &Path, depths: &DepthMap) -> ConfigResult<ResolvedConfig<R::Handle>> {
        let _span = tracing::info_span!("load_config", path = %path.display()).entered();
        let tree = self.reader.read(path)?;
        self.load_tree(&tree, depths)
    }

    /// Resolve an already parsed tree.
    pub fn load_tree(
        &self,
        tree: &ConfigNode,
        depths: &DepthMap,
    ) -> ConfigResult<ResolvedConfig<R::Handle>> {
        let namespace = Flattener::new(depths.clone())
            .with_separator(self.separator.as_str())
            .with_collision_policy(self.collision)
            .flatten(tree)?;

        let resolved = PluginResolver::new(&self.registry)
            .with_separator(self.separator.as_str())
            .resolve_in(&namespace, &self.plugin_path)?;

        tracing::info!(
            keys = resolved.len(),
            plugins = resolved.plugins().map_or(0, |p| p.handles().len()),
            "configuration loaded"
        );
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ConfigError;
    use crate::domain::models::plugin::PluginTree;
    use crate::infrastructure::plugins::InMemoryRegistry;
    use serde_json::json;
    use std::cell::Cell;
    use std::num::NonZeroUsize;

    /// Reader returning a fixed tree and counting reads.
    struct StaticReader {
        tree: ConfigNode,
        reads: Cell<usize>,
    }

    impl DocumentReader for StaticReader {
        fn read(&self, _path: &Path) -> ConfigResult<ConfigNode> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.tree.clone())
        }
    }

    fn reference_depths() -> DepthMap {
        DepthMap::new().with("plugins", NonZeroUsize::MIN)
    }

    fn service(tree: ConfigNode) -> ConfigService<StaticReader, InMemoryRegistry<&'static str>> {
        ConfigService::new(
            StaticReader {
                tree,
                reads: Cell::new(0),
            },
            InMemoryRegistry::new([("csv", "csv-handle"), ("json", "json-handle")]),
        )
    }

    #[test]
    fn test_load_end_to_end() {
        let svc = service(json!({
            "log": {"level": "info"},
            "plugins": {"parse": ["csv", "json"], "emit": {"main": "json"}},
            "retries": 3
        }));

        let cfg = svc.load(Path::new("config.yaml"), &reference_depths()).unwrap();
        assert_eq!(svc.reader.reads.get(), 1);
        assert_eq!(cfg.keys().collect::<Vec<_>>(), vec!["log_level", "plugins", "retries"]);
        assert_eq!(cfg.value("log_level"), Some(&json!("info")));

        let plugins = cfg.plugins().unwrap();
        assert_eq!(
            plugins.child("parse"),
            Some(&PluginTree::List(vec!["csv-handle", "json-handle"]))
        );
        assert_eq!(
            plugins.at(["emit", "main"]),
            Some(&PluginTree::Single("json-handle"))
        );
    }

    #[test]
    fn test_unknown_plugin_fails_whole_load() {
        let svc = service(json!({"plugins": {"parse": ["csv", "xml"]}}));
        let err = svc
            .load(Path::new("config.yaml"), &reference_depths())
            .unwrap_err();
        assert!(matches!(err, ConfigError::PluginNotFound { ref name, .. } if name == "xml"));
    }

    #[test]
    fn test_without_depth_entry_plugins_are_flattened_first() {
        // With no depth cap the plugin branch is split into leaf keys, so the
        // `plugins` path itself is absent and nothing is resolved.
        let svc = service(json!({"plugins": {"parse": "csv"}}));
        let cfg = svc.load(Path::new("c.yaml"), &DepthMap::new()).unwrap();
        assert!(cfg.plugins().is_none());
        assert_eq!(cfg.value("plugins_parse"), Some(&json!("csv")));
        assert_eq!(svc.registry().total_loads(), 0);
    }

    #[test]
    fn test_custom_plugin_path_and_separator() {
        let svc = service(json!({"ext": {"loaders": ["csv"]}, "a": {"b": 1}}))
            .with_plugin_path("ext")
            .with_separator(".");
        let depths = DepthMap::new().with("ext", NonZeroUsize::MIN);

        let cfg = svc.load_tree(&svc.reader.tree.clone(), &depths).unwrap();
        assert!(cfg.contains("a.b"));
        assert_eq!(
            cfg.plugins().and_then(|p| p.child("loaders")),
            Some(&PluginTree::List(vec!["csv-handle"]))
        );
    }

    #[test]
    fn test_collision_policy_is_applied() {
        let tree = json!({"a_b": 1, "a": {"b": 2}});
        assert!(service(tree.clone())
            .load_tree(&tree, &DepthMap::new())
            .is_err());

        let cfg = service(tree.clone())
            .with_collision_policy(CollisionPolicy::LastWriteWins)
            .load_tree(&tree, &DepthMap::new())
            .unwrap();
        assert_eq!(cfg.value("a_b"), Some(&json!(2)));
    }
}
