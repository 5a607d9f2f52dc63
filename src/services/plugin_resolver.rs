//! Plugin reference resolution.
//!
//! Walks a plugin declaration (the value bound at the plugin path of a flat
//! namespace) and replaces every plugin name with the handle the registry
//! loads for it. The result is a new [`PluginTree`] with the declaration's shape;
//! the declaration itself is never modified, so a failed pass leaves nothing
//! half-resolved.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::namespace::FlatNamespace;
use crate::domain::models::plugin::PluginTree;
use crate::domain::models::resolved::ResolvedConfig;
use crate::domain::models::tree::{qualify, ConfigNode};
use crate::domain::ports::plugin_registry::{PluginLoadError, PluginRegistry};

/// Conventional namespace path holding plugin declarations.
pub const DEFAULT_PLUGIN_PATH: &str = "plugins";

/// Resolves plugin declarations against a registry.
pub struct PluginResolver<'r, R> {
    registry: &'r R,
    separator: String,
}

impl<'r, R: PluginRegistry> PluginResolver<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            separator: crate::services::flattener::DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Separator used when naming nested declaration paths in errors.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Resolve a plugin declaration.
    ///
    /// An absent declaration resolves to `None` without touching the registry.
    /// Names are checked in document order and the first unknown name aborts
    /// the pass with [`ConfigError::PluginNotFound`].
    pub fn resolve(&self, spec: Option<&ConfigNode>) -> ConfigResult<Option<PluginTree<R::Handle>>> {
        self.resolve_at(DEFAULT_PLUGIN_PATH, spec)
    }

    /// Like [`resolve`](Self::resolve), naming the declaration `path` in errors.
    pub fn resolve_at(
        &self,
        path: &str,
        spec: Option<&ConfigNode>,
    ) -> ConfigResult<Option<PluginTree<R::Handle>>> {
        let Some(spec) = spec else {
            tracing::debug!(path, "no plugins declared");
            return Ok(None);
        };

        let known = self.registry.known_names();
        let mut pass = Pass {
            registry: self.registry,
            known: &known,
            separator: &self.separator,
            loaded: 0,
        };
        let tree = pass.node(path, spec)?;

        tracing::info!(
            path,
            loaded = pass.loaded,
            known = known.len(),
            "resolved plugin declarations"
        );
        Ok(Some(tree))
    }

    /// Resolve the declaration bound at `plugin_path` in `namespace`.
    ///
    /// `namespace` is only read. The returned configuration is built from a
    /// copy taken after the whole pass succeeded, so on error the caller
    /// still holds the raw declaration.
    pub fn resolve_in(
        &self,
        namespace: &FlatNamespace,
        plugin_path: &str,
    ) -> ConfigResult<ResolvedConfig<R::Handle>> {
        let plugins = self.resolve_at(plugin_path, namespace.get(plugin_path))?;
        let position = namespace
            .keys()
            .position(|k| k == plugin_path)
            .unwrap_or(namespace.len());
        let mut namespace = namespace.clone();
        namespace.remove(plugin_path);
        Ok(ResolvedConfig::new(
            namespace,
            plugin_path.to_string(),
            plugins,
            position,
        ))
    }
}

/// State for a single resolution pass.
struct Pass<'a, R> {
    registry: &'a R,
    known: &'a BTreeSet<String>,
    separator: &'a str,
    loaded: usize,
}

impl<R: PluginRegistry> Pass<'_, R> {
    fn node(&mut self, path: &str, node: &ConfigNode) -> ConfigResult<PluginTree<R::Handle>> {
        match node {
            Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let child_path = qualify(Some(path), key, self.separator);
                    entries.push((key.clone(), self.node(&child_path, value)?));
                }
                Ok(PluginTree::Group(entries))
            }
            Value::Array(items) => {
                let mut handles = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{index}]");
                    let Value::String(name) = item else {
                        return Err(ConfigError::malformed(
                            item_path,
                            "plugin sequences may only contain plugin names",
                        ));
                    };
                    handles.push(self.load(&item_path, name)?);
                }
                Ok(PluginTree::List(handles))
            }
            Value::String(name) => Ok(PluginTree::Single(self.load(path, name)?)),
            Value::Null => Ok(PluginTree::Empty),
            other => Err(ConfigError::malformed(
                path,
                format!("expected a plugin name, found {other}"),
            )),
        }
    }

    fn load(&mut self, path: &str, name: &str) -> ConfigResult<R::Handle> {
        if !self.known.contains(name) {
            return Err(ConfigError::PluginNotFound {
                name: name.to_string(),
                path: path.to_string(),
            });
        }

        let handle = self.registry.load(name).map_err(|e| match e {
            PluginLoadError::NotFound(_) => ConfigError::PluginNotFound {
                name: name.to_string(),
                path: path.to_string(),
            },
            other => ConfigError::PluginLoad {
                name: name.to_string(),
                reason: other.to_string(),
            },
        })?;

        tracing::debug!(path, plugin = name, "loaded plugin");
        self.loaded += 1;
        Ok(handle)
    }
}
