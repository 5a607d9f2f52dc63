use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use super::settings::LoaderSettings;
use crate::infrastructure::logging::config::VALID_LOG_LEVELS;

/// Default settings file, looked up in the working directory
pub const SETTINGS_FILE: &str = "plugconf.yaml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PLUGCONF_";

/// Settings validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Separator cannot be empty")]
    EmptySeparator,

    #[error("Plugin path cannot be empty")]
    EmptyPluginPath,

    #[error("Document path cannot be empty")]
    EmptyDocument,

    #[error("Invalid depth {depth} for '{path}': must be at least 1")]
    InvalidDepth { path: String, depth: usize },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Loader settings with hierarchical merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. plugconf.yaml in the working directory (optional)
    /// 3. Environment variables (PLUGCONF_* prefix, `__` for nesting)
    pub fn load() -> Result<LoaderSettings> {
        let settings: LoaderSettings = Self::base()
            .merge(Yaml::file(SETTINGS_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract loader settings from figment")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Load settings from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<LoaderSettings> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }

        let settings: LoaderSettings = Self::base()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(LoaderSettings::default()))
    }

    /// Validate settings after loading
    pub fn validate(settings: &LoaderSettings) -> Result<(), SettingsError> {
        if settings.separator.is_empty() {
            return Err(SettingsError::EmptySeparator);
        }

        if settings.plugin_path.is_empty() {
            return Err(SettingsError::EmptyPluginPath);
        }

        if settings.document.as_os_str().is_empty() {
            return Err(SettingsError::EmptyDocument);
        }

        if let Some((path, depth)) = settings.depths.iter().find(|(_, d)| **d == 0) {
            return Err(SettingsError::InvalidDepth {
                path: path.clone(),
                depth: *depth,
            });
        }

        let level = settings.logging.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(SettingsError::InvalidLogLevel(settings.logging.level.clone()));
        }

        Ok(())
    }
}
