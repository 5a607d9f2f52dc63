//! Infrastructure layer module
//!
//! This module contains the adapters behind the domain ports and the ambient
//! concerns around them:
//! - Document reading (YAML / JSON files)
//! - Plugin registries (filesystem and in-memory)
//! - Loader settings management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod document;
pub mod logging;
pub mod plugins;
