//! Implementation of the `plugconf plugins` commands.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use super::RunContext;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::PluginCommands;
use crate::domain::ports::plugin_registry::PluginRegistry;

#[derive(Debug, Serialize)]
pub struct PluginListEntry {
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct PluginListOutput {
    pub plugin_dir: PathBuf,
    pub plugins: Vec<PluginListEntry>,
}

impl CommandOutput for PluginListOutput {
    fn to_human(&self) -> String {
        if self.plugins.is_empty() {
            return format!("No plugins found in {}.", self.plugin_dir.display());
        }

        let mut lines = vec![format!(
            "{:<20} {:<10} {:<8} {}",
            "NAME", "VERSION", "STATUS", "DESCRIPTION"
        )];
        lines.push("-".repeat(68));

        for p in &self.plugins {
            lines.push(format!(
                "{:<20} {:<10} {:<8} {}",
                p.name, p.version, p.status, p.description
            ));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(ctx: &RunContext, command: &PluginCommands, json_mode: bool) -> Result<()> {
    match command {
        PluginCommands::List => list(ctx, json_mode),
    }
}

fn list(ctx: &RunContext, json_mode: bool) -> Result<()> {
    let registry = ctx.registry();
    let plugins = registry
        .known_names()
        .into_iter()
        .map(|name| match registry.load(&name) {
            Ok(handle) => PluginListEntry {
                entry: handle.entry_path(),
                name,
                version: handle.manifest.version,
                description: handle.manifest.description,
                status: "ok".to_string(),
            },
            Err(e) => PluginListEntry {
                name,
                version: "-".to_string(),
                description: e.to_string(),
                status: "error".to_string(),
                entry: None,
            },
        })
        .collect();

    output(
        &PluginListOutput {
            plugin_dir: registry.root().to_path_buf(),
            plugins,
        },
        json_mode,
    );
    Ok(())
}
