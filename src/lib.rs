//! plugconf - Flattened configuration with plugin resolution
//!
//! plugconf reads a hierarchical configuration document, flattens it into a
//! single namespace of separator-joined keys under per-key depth limits, and
//! resolves the plugin names it declares against a plugin registry.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Configuration models, errors, and ports
//! - **Service Layer** (`services`): Flattening and plugin resolution
//! - **Infrastructure Layer** (`infrastructure`): Document readers, plugin
//!   registries, settings, and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use plugconf::{flatten, DepthMap};
//! use serde_json::json;
//!
//! let tree = json!({ "server": { "host": "localhost", "port": 8080 } });
//! let namespace = flatten(&tree, &DepthMap::new()).unwrap();
//! assert_eq!(namespace.get("server_port"), Some(&json!(8080)));
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ConfigError, ConfigResult};
pub use domain::models::{
    CollisionPolicy, ConfigNode, DepthMap, FlatNamespace, FlattenDepth, PluginHandle,
    PluginManifest, PluginTree, ResolvedConfig, Setting,
};
pub use domain::ports::{DocumentReader, PluginLoadError, PluginRegistry};
pub use services::{flatten, ConfigService, Flattener, PluginResolver};
