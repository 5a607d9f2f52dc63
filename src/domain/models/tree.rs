//! Configuration tree model.
//!
//! A parsed document is a [`serde_json::Value`]. With the `preserve_order`
//! feature enabled, objects keep their document order, so a mapping is an
//! ordered `key -> node` table with unique string keys. Arrays are sequences
//! and every other variant is a scalar.

use serde_json::{Map, Value};

/// A node of the configuration tree.
pub type ConfigNode = Value;

/// An ordered mapping node.
pub type ConfigMap = Map<String, Value>;

/// Display name used for the root of the tree in error paths.
pub const ROOT_PATH: &str = "<root>";

/// Shape of a node, used in log fields and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

impl NodeKind {
    pub fn of(node: &ConfigNode) -> Self {
        match node {
            Value::Object(_) => Self::Mapping,
            Value::Array(_) => Self::Sequence,
            _ => Self::Scalar,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Scalar => "scalar",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join a parent path and a key. Top-level keys (no parent) have no separator.
pub fn qualify(parent: Option<&str>, key: &str, separator: &str) -> String {
    match parent {
        None => key.to_string(),
        Some(parent) => format!("{parent}{separator}{key}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_kind() {
        assert_eq!(NodeKind::of(&json!({"a": 1})), NodeKind::Mapping);
        assert_eq!(NodeKind::of(&json!([1, 2])), NodeKind::Sequence);
        assert_eq!(NodeKind::of(&json!("x")), NodeKind::Scalar);
        assert_eq!(NodeKind::of(&Value::Null), NodeKind::Scalar);
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify(None, "a", "_"), "a");
        assert_eq!(qualify(Some("a"), "b", "_"), "a_b");
        assert_eq!(qualify(Some("a_b"), "c", "."), "a_b.c");
        assert_eq!(qualify(Some(""), "c", "_"), "_c");
    }

    #[test]
    fn test_mapping_keeps_document_order() {
        let node: ConfigNode = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = node.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
