//! Flat, path-addressable configuration namespace.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::tree::{ConfigMap, ConfigNode};

/// What happens when two bindings produce the same qualified path.
///
/// With the `_` separator, `{"a_b": 1, "a": {"b": 2}}` binds `a_b` twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Fail with a malformed-config error naming the path.
    #[default]
    Reject,
    /// Keep the position of the first binding and the value of the last.
    LastWriteWins,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::LastWriteWins => "last_write_wins",
        }
    }
}

/// Ordered mapping from qualified path to value.
///
/// Values are scalars, sequences, or whole sub-mappings where flattening
/// stopped at a depth cap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatNamespace {
    entries: ConfigMap,
}

impl FlatNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` at `path` according to `policy`.
    pub fn bind(
        &mut self,
        path: String,
        value: ConfigNode,
        policy: CollisionPolicy,
    ) -> ConfigResult<()> {
        if self.entries.contains_key(&path) {
            match policy {
                CollisionPolicy::Reject => {
                    return Err(ConfigError::malformed(
                        path,
                        "qualified path is produced by more than one key",
                    ));
                }
                CollisionPolicy::LastWriteWins => {
                    tracing::debug!(path = %path, "overwriting existing binding");
                }
            }
        }
        self.entries.insert(path, value);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    /// Like [`get`](Self::get) but a missing path is an error.
    pub fn require(&self, path: &str) -> ConfigResult<&Value> {
        self.get(path)
            .ok_or_else(|| ConfigError::MissingKey(path.to_string()))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Remove a binding, keeping the order of the remaining ones.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        self.entries.shift_remove(path)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for FlatNamespace {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
