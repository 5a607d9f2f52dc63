//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::time::parse_millis;

#[derive(Parser, Debug)]
#[command(name = "plugconf")]
#[command(about = "plugconf - Flattened configuration with plugin resolution", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Loader settings file (defaults to ./plugconf.yaml when present)
    #[arg(short, long, global = true, env = "PLUGCONF_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Parameters of a run, shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Configuration document (overrides the settings file)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Query window start (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
    #[arg(long, global = true, value_parser = parse_millis)]
    pub start_time: Option<i64>,

    /// Query window end (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
    #[arg(long, global = true, value_parser = parse_millis)]
    pub end_time: Option<i64>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_path: Option<PathBuf>,

    /// Upload target path
    #[arg(long = "upload", global = true)]
    pub upload_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the configuration and print every key
    Show,

    /// Print a single configuration value
    Get {
        /// Qualified path, e.g. server_port
        path: String,
    },

    /// Plugin registry commands
    #[command(subcommand)]
    Plugins(PluginCommands),
}

#[derive(Subcommand, Debug)]
pub enum PluginCommands {
    /// List plugins found in the plugin directory
    List,
}
