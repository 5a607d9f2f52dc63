//! Depth-controlled tree flattening.
//!
//! Projects a configuration tree into a [`FlatNamespace`]. Every top-level
//! key looks up its own depth in the [`DepthMap`]; below that, each level of
//! mapping consumes one unit of depth. When a mapping is reached with no
//! depth left it is bound whole at its qualified path.

use serde_json::Value;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::depth::{DepthMap, FlattenDepth};
use crate::domain::models::namespace::{CollisionPolicy, FlatNamespace};
use crate::domain::models::tree::{qualify, ConfigMap, ConfigNode, NodeKind, ROOT_PATH};

/// Default separator between path segments.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Flattens configuration trees under a fixed depth map.
#[derive(Debug, Clone)]
pub struct Flattener {
    depths: DepthMap,
    separator: String,
    collision: CollisionPolicy,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new(DepthMap::default())
    }
}

/// Outcome of walking a depth-map path against the tree.
enum DepthTarget {
    /// The path names a node; `level` 0 is a top-level key.
    Found { level: usize },
    /// The path continues below a value that is not a mapping.
    Blocked { at: String, kind: NodeKind },
    Absent,
}

impl Flattener {
    pub fn new(depths: DepthMap) -> Self {
        Self {
            depths,
            separator: DEFAULT_SEPARATOR.to_string(),
            collision: CollisionPolicy::default(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }

    pub fn depths(&self) -> &DepthMap {
        &self.depths
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Flatten `tree` into a new namespace.
    ///
    /// The root must be a mapping. Depth-map entries are checked against the
    /// tree first: an entry whose path runs through a scalar or sequence is
    /// malformed.
    pub fn flatten(&self, tree: &ConfigNode) -> ConfigResult<FlatNamespace> {
        let Value::Object(root) = tree else {
            return Err(ConfigError::malformed(
                ROOT_PATH,
                format!("document root must be a mapping, found a {}", NodeKind::of(tree)),
            ));
        };

        self.check_depth_entries(root)?;

        let mut namespace = FlatNamespace::new();
        for (key, value) in root {
            let depth = self.depths.depth_for(key);
            self.bind(key.clone(), value, depth, &mut namespace)?;
        }

        tracing::debug!(
            keys = namespace.len(),
            depth_entries = self.depths.len(),
            "flattened configuration tree"
        );
        Ok(namespace)
    }

    fn bind(
        &self,
        path: String,
        value: &ConfigNode,
        depth: FlattenDepth,
        namespace: &mut FlatNamespace,
    ) -> ConfigResult<()> {
        match value {
            Value::Object(child) if depth.descends() => {
                let depth = depth.decrement();
                for (key, value) in child {
                    let path = qualify(Some(&path), key, &self.separator);
                    self.bind(path, value, depth, namespace)?;
                }
                Ok(())
            }
            _ => {
                tracing::trace!(path = %path, kind = %NodeKind::of(value), "binding");
                namespace.bind(path, value.clone(), self.collision)
            }
        }
    }

    fn check_depth_entries(&self, root: &ConfigMap) -> ConfigResult<()> {
        for (path, depth) in self.depths.iter() {
            match self.locate(root, None, path, 0) {
                DepthTarget::Found { level: 0 } => {}
                DepthTarget::Found { level } => {
                    tracing::warn!(
                        path,
                        depth = depth.get(),
                        level,
                        "depth entry names a nested path; only top-level entries apply"
                    );
                }
                DepthTarget::Blocked { at, kind } => {
                    return Err(ConfigError::malformed(
                        path,
                        format!("depth entry leads through a {kind} value at '{at}'"),
                    ));
                }
                DepthTarget::Absent => {
                    tracing::debug!(path, "depth entry does not match any key");
                }
            }
        }
        Ok(())
    }

    /// Find the node `target` names below `map`.
    ///
    /// Keys may contain the separator, so more than one key can be a prefix
    /// of `target`. A match anywhere wins over a blocked walk.
    fn locate(
        &self,
        map: &ConfigMap,
        parent: Option<&str>,
        target: &str,
        level: usize,
    ) -> DepthTarget {
        let mut blocked = None;
        for (key, value) in map {
            let path = qualify(parent, key, &self.separator);
            if path == target {
                return DepthTarget::Found { level };
            }
            let Some(rest) = target.strip_prefix(path.as_str()) else {
                continue;
            };
            if !rest.starts_with(self.separator.as_str()) {
                continue;
            }
            match value {
                Value::Object(child) => match self.locate(child, Some(&path), target, level + 1) {
                    found @ DepthTarget::Found { .. } => return found,
                    b @ DepthTarget::Blocked { .. } => blocked = blocked.or(Some(b)),
                    DepthTarget::Absent => {}
                },
                other => {
                    blocked = blocked.or(Some(DepthTarget::Blocked {
                        at: path,
                        kind: NodeKind::of(other),
                    }));
                }
            }
        }
        blocked.unwrap_or(DepthTarget::Absent)
    }
}

/// Flatten with the default separator and collision policy.
pub fn flatten(tree: &ConfigNode, depths: &DepthMap) -> ConfigResult<FlatNamespace> {
    Flattener::new(depths.clone()).flatten(tree)
}
