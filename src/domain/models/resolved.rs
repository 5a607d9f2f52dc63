//! The final configuration object handed to callers.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::namespace::FlatNamespace;
use crate::domain::models::plugin::PluginTree;

/// A value looked up in a [`ResolvedConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setting<'a, H> {
    /// An ordinary configuration value.
    Value(&'a Value),
    /// The resolved plugin declarations.
    Plugins(&'a PluginTree<H>),
}

impl<'a, H> Setting<'a, H> {
    pub fn as_value(&self) -> Option<&'a Value> {
        match *self {
            Self::Value(v) => Some(v),
            Self::Plugins(_) => None,
        }
    }

    pub fn as_plugins(&self) -> Option<&'a PluginTree<H>> {
        match *self {
            Self::Plugins(p) => Some(p),
            Self::Value(_) => None,
        }
    }
}

/// Flat namespace whose plugin branch has been replaced by loaded handles.
///
/// The plugin path keeps its place among the keys; looking it up yields
/// [`Setting::Plugins`]. When the document declares no plugins the path is
/// absent and [`plugins`](Self::plugins) is `None`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig<H> {
    namespace: FlatNamespace,
    plugin_path: String,
    plugins: Option<PluginTree<H>>,
    /// Insertion index of the plugin path among the namespace keys.
    plugin_position: usize,
}

impl<H> ResolvedConfig<H> {
    /// Assemble from a namespace with the plugin binding already removed.
    pub(crate) fn new(
        namespace: FlatNamespace,
        plugin_path: String,
        plugins: Option<PluginTree<H>>,
        plugin_position: usize,
    ) -> Self {
        Self {
            namespace,
            plugin_path,
            plugins,
            plugin_position,
        }
    }

    pub fn get(&self, path: &str) -> Option<Setting<'_, H>> {
        if path == self.plugin_path {
            return self.plugins.as_ref().map(Setting::Plugins);
        }
        self.namespace.get(path).map(Setting::Value)
    }

    /// Like [`get`](Self::get) but a missing path is an error.
    pub fn require(&self, path: &str) -> ConfigResult<Setting<'_, H>> {
        self.get(path)
            .ok_or_else(|| ConfigError::MissingKey(path.to_string()))
    }

    /// Ordinary value at `path`. The plugin path is never a plain value.
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.namespace.get(path)
    }

    pub fn plugins(&self) -> Option<&PluginTree<H>> {
        self.plugins.as_ref()
    }

    pub fn plugin_path(&self) -> &str {
        &self.plugin_path
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// All bindings in document order, including the plugin branch.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Setting<'_, H>)> {
        let plugin = self
            .plugins
            .as_ref()
            .map(|p| (self.plugin_path.as_str(), Setting::Plugins(p)));
        let mut values = self.namespace.iter().map(|(k, v)| (k, Setting::Value(v)));
        let before: Vec<_> = values.by_ref().take(self.plugin_position).collect();
        before.into_iter().chain(plugin).chain(values)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.namespace.len() + usize::from(self.plugins.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H: Serialize> Serialize for ResolvedConfig<H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, setting) in self.iter() {
            match setting {
                Setting::Value(v) => map.serialize_entry(key, v)?,
                Setting::Plugins(p) => map.serialize_entry(key, p)?,
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::namespace::CollisionPolicy;
    use serde_json::json;

    fn config() -> ResolvedConfig<&'static str> {
        let mut ns = FlatNamespace::new();
        ns.bind("name".into(), json!("svc"), CollisionPolicy::Reject).unwrap();
        ns.bind("db_port".into(), json!(5432), CollisionPolicy::Reject).unwrap();
        let plugins = PluginTree::Group(vec![("parse".to_string(), PluginTree::Single("csv"))]);
        ResolvedConfig::new(ns, "plugins".to_string(), Some(plugins), 1)
    }

    #[test]
    fn test_get_distinguishes_plugins_from_values() {
        let cfg = config();
        assert_eq!(cfg.get("name").and_then(|s| s.as_value()), Some(&json!("svc")));
        let plugins = cfg.get("plugins").and_then(|s| s.as_plugins()).unwrap();
        assert_eq!(plugins.child("parse"), Some(&PluginTree::Single("csv")));
        assert!(cfg.value("plugins").is_none());
    }

    #[test]
    fn test_require_missing() {
        let cfg = config();
        assert!(matches!(
            cfg.require("nope"),
            Err(ConfigError::MissingKey(ref k)) if k == "nope"
        ));
        assert!(cfg.require("db_port").is_ok());
    }

    #[test]
    fn test_iter_keeps_plugin_position() {
        let cfg = config();
        assert_eq!(cfg.keys().collect::<Vec<_>>(), vec!["name", "plugins", "db_port"]);
        assert_eq!(cfg.len(), 3);
    }

    #[test]
    fn test_serialize() {
        let value = serde_json::to_value(config()).unwrap();
        assert_eq!(
            value,
            json!({"name": "svc", "plugins": {"parse": "csv"}, "db_port": 5432})
        );
    }

    #[test]
    fn test_without_plugins() {
        let cfg: ResolvedConfig<&str> =
            ResolvedConfig::new(FlatNamespace::new(), "plugins".to_string(), None, 0);
        assert!(cfg.is_empty());
        assert!(cfg.get("plugins").is_none());
        assert!(cfg.plugins().is_none());
    }
}
