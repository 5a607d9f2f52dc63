use std::path::{Component, Path, PathBuf};

use serde_json::{Number, Value};
use serde_yaml::Value as YamlValue;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::tree::{ConfigMap, ConfigNode};
use crate::domain::ports::document_reader::DocumentReader;

/// Reads configuration documents from the filesystem.
///
/// Files ending in `.json` are parsed as JSON; everything else as YAML.
#[derive(Debug, Clone)]
pub struct FileDocumentReader {
    base_dir: PathBuf,
}

impl Default for FileDocumentReader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileDocumentReader {
    /// Bare file names are looked up in `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Parse document text. `origin` is only used in error messages and to
    /// pick the format.
    pub fn parse_str(content: &str, origin: &Path) -> ConfigResult<ConfigNode> {
        let is_json = origin
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let node = if is_json {
            serde_json::from_str::<Value>(content).map_err(|e| ConfigError::Parse {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            let yaml: YamlValue =
                serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
                    path: origin.to_path_buf(),
                    reason: e.to_string(),
                })?;
            yaml_to_node(yaml, "$").map_err(|reason| ConfigError::Parse {
                path: origin.to_path_buf(),
                reason,
            })?
        };

        // An empty document is an empty mapping.
        Ok(match node {
            Value::Null => Value::Object(ConfigMap::new()),
            other => other,
        })
    }
}

impl DocumentReader for FileDocumentReader {
    fn read(&self, path: &Path) -> ConfigResult<ConfigNode> {
        let path = resolve_document_path(&self.base_dir, path);
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "read configuration document");
        Self::parse_str(&content, &path)
    }
}

/// Resolve a document path: a bare file name is joined onto `base_dir`,
/// anything with a directory component is used as given.
pub fn resolve_document_path(base_dir: &Path, path: &Path) -> PathBuf {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => base_dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// Convert a YAML tree, stringifying scalar mapping keys.
fn yaml_to_node(value: YamlValue, at: &str) -> Result<ConfigNode, String> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => yaml_number(&n, at)?,
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| yaml_to_node(item, &format!("{at}[{i}]")))
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = ConfigMap::new();
            for (key, value) in mapping {
                let key = yaml_key(key, at)?;
                if map.contains_key(&key) {
                    return Err(format!("duplicate mapping key at {at}.{key}"));
                }
                let child = yaml_to_node(value, &format!("{at}.{key}"))?;
                map.insert(key, child);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_node(tagged.value, at)?,
    })
}

fn yaml_key(key: YamlValue, at: &str) -> Result<String, String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value, at),
        YamlValue::Null => Err(format!("null mapping key at {at}")),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            Err(format!("mapping keys must be scalars at {at}"))
        }
    }
}

fn yaml_number(n: &serde_yaml::Number, at: &str) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Number(i.into()));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::Number(u.into()));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("non-finite number {n} at {at}"))
}
