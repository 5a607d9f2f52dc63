//! Per-path flatten depth limits.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use crate::domain::errors::{ConfigError, ConfigResult};

/// How many mapping levels below a top-level key are merged into the
/// namespace before the remaining sub-tree is bound whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenDepth {
    /// Recurse for as long as the value is a mapping.
    Unlimited,
    /// Recurse at most this many levels (1 = bind the value whole).
    Limited(NonZeroUsize),
}

impl FlattenDepth {
    /// Whether a mapping at this depth is descended into.
    pub fn descends(self) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(n) => n.get() > 1,
        }
    }

    /// The depth used one level further down.
    ///
    /// Only meaningful when [`descends`](Self::descends) is true.
    pub fn decrement(self) -> Self {
        match self {
            Self::Unlimited => Self::Unlimited,
            Self::Limited(n) => NonZeroUsize::new(n.get() - 1).map_or(self, Self::Limited),
        }
    }
}

/// Table of qualified path -> maximum flatten depth.
///
/// Absent entries mean unlimited depth. Lookups only happen for top-level
/// keys; nested paths inherit the decremented depth of their ancestor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthMap {
    entries: BTreeMap<String, NonZeroUsize>,
}

impl DepthMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a depth map from raw `(path, depth)` pairs, rejecting zero depths.
    pub fn from_entries<I, K>(entries: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, usize)>,
        K: Into<String>,
    {
        let mut map = Self::new();
        for (path, depth) in entries {
            map.insert(path, depth)?;
        }
        Ok(map)
    }

    /// Builder-style insert for literal tables.
    pub fn with(mut self, path: impl Into<String>, depth: NonZeroUsize) -> Self {
        self.entries.insert(path.into(), depth);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, depth: usize) -> ConfigResult<()> {
        let path = path.into();
        let depth = NonZeroUsize::new(depth).ok_or_else(|| ConfigError::InvalidDepth {
            path: path.clone(),
            depth,
        })?;
        self.entries.insert(path, depth);
        Ok(())
    }

    /// Depth for a top-level path, unlimited when absent.
    pub fn depth_for(&self, path: &str) -> FlattenDepth {
        self.entries
            .get(path)
            .copied()
            .map_or(FlattenDepth::Unlimited, FlattenDepth::Limited)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NonZeroUsize)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
