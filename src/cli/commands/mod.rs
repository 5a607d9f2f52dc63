//! CLI command implementations.

pub mod get;
pub mod plugins;
pub mod show;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::types::RunArgs;
use crate::domain::models::plugin::PluginHandle;
use crate::domain::models::resolved::ResolvedConfig;
use crate::infrastructure::config::{LoaderSettings, SettingsLoader};
use crate::infrastructure::document::FileDocumentReader;
use crate::infrastructure::plugins::FsPluginRegistry;
use crate::services::ConfigService;

/// Run parameters taken from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunParams {
    /// Window start in epoch milliseconds (0 when unset)
    pub start_time: i64,
    /// Window end in epoch milliseconds (0 when unset)
    pub end_time: i64,
    pub log_path: Option<PathBuf>,
    pub upload_path: Option<PathBuf>,
}

impl From<&RunArgs> for RunParams {
    fn from(args: &RunArgs) -> Self {
        Self {
            start_time: args.start_time.unwrap_or(0),
            end_time: args.end_time.unwrap_or(0),
            log_path: args.log_path.clone(),
            upload_path: args.upload_path.clone(),
        }
    }
}

/// Everything a command needs: effective settings and run parameters
#[derive(Debug, Clone)]
pub struct RunContext {
    pub settings: LoaderSettings,
    pub run: RunParams,
}

impl RunContext {
    /// Load settings and fold the command-line overrides into them
    pub fn prepare(settings_file: Option<&Path>, args: &RunArgs) -> Result<Self> {
        let mut settings = match settings_file {
            Some(path) => SettingsLoader::load_from_file(path)?,
            None => SettingsLoader::load()?,
        };
        apply_run_args(&mut settings, args);
        Ok(Self {
            settings,
            run: RunParams::from(args),
        })
    }

    /// Plugin directory, relative paths taken from the base directory
    pub fn plugin_dir(&self) -> PathBuf {
        if self.settings.plugin_dir.is_absolute() {
            self.settings.plugin_dir.clone()
        } else {
            self.settings.base_dir.join(&self.settings.plugin_dir)
        }
    }

    pub fn registry(&self) -> FsPluginRegistry {
        FsPluginRegistry::new(self.plugin_dir())
    }

    /// Read, flatten, and resolve the configured document
    pub fn load_configuration(&self) -> Result<ResolvedConfig<PluginHandle>> {
        let settings = &self.settings;
        let depths = settings
            .depth_map()
            .context("Invalid depth table in loader settings")?;

        let service = ConfigService::new(
            FileDocumentReader::new(&settings.base_dir),
            self.registry(),
        )
        .with_plugin_path(settings.plugin_path.as_str())
        .with_separator(settings.separator.as_str())
        .with_collision_policy(settings.collision);

        service
            .load(&settings.document, &depths)
            .with_context(|| format!("Failed to load configuration {}", settings.document.display()))
    }
}

/// Command-line flags take precedence over settings
pub fn apply_run_args(settings: &mut LoaderSettings, args: &RunArgs) {
    if let Some(config) = &args.config {
        settings.document = config.clone();
    }
    if let Some(log_path) = &args.log_path {
        settings.logging.log_file = Some(log_path.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_run_args_overrides() {
        let mut settings = LoaderSettings::default();
        let args = RunArgs {
            config: Some(PathBuf::from("other.yaml")),
            log_path: Some(PathBuf::from("run.log")),
            ..RunArgs::default()
        };
        apply_run_args(&mut settings, &args);
        assert_eq!(settings.document, PathBuf::from("other.yaml"));
        assert_eq!(settings.logging.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn test_apply_run_args_keeps_settings_when_unset() {
        let mut settings = LoaderSettings::default();
        apply_run_args(&mut settings, &RunArgs::default());
        assert_eq!(settings, LoaderSettings::default());
    }

    #[test]
    fn test_run_params_default_times_to_zero() {
        let params = RunParams::from(&RunArgs {
            start_time: Some(1_000),
            ..RunArgs::default()
        });
        assert_eq!(params.start_time, 1_000);
        assert_eq!(params.end_time, 0);
    }

    #[test]
    fn test_plugin_dir_relative_to_base() {
        let mut settings = LoaderSettings::default();
        settings.base_dir = PathBuf::from("/srv/app");
        let ctx = RunContext {
            settings,
            run: RunParams::default(),
        };
        assert_eq!(ctx.plugin_dir(), PathBuf::from("/srv/app/plugins"));
    }
}
