//! Loader settings infrastructure
//!
//! Hierarchical settings using figment:
//! - Programmatic defaults
//! - YAML file loading
//! - Environment variable overrides
//! - Settings validation

pub mod loader;
pub mod settings;

pub use loader::{SettingsError, SettingsLoader};
pub use settings::LoaderSettings;
