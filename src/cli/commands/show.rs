//! Implementation of the `plugconf show` command.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use super::{RunContext, RunParams};
use crate::cli::output::{inline_value, output, truncate, CommandOutput};
use crate::domain::models::plugin::PluginHandle;
use crate::domain::models::resolved::{ResolvedConfig, Setting};

const MAX_VALUE_WIDTH: usize = 80;

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub document: String,
    pub config: ResolvedConfig<PluginHandle>,
    pub run: RunParams,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["KEY", "VALUE"]);

        for (key, setting) in self.config.iter() {
            let value = match setting {
                Setting::Value(v) => inline_value(v),
                Setting::Plugins(tree) => {
                    let names: Vec<&str> = tree.handles().iter().map(|h| h.name()).collect();
                    format!("[plugins] {}", names.join(", "))
                }
            };
            table.add_row(vec![key.to_string(), truncate(&value, MAX_VALUE_WIDTH)]);
        }

        let mut lines = vec![format!("Configuration: {}", self.document), table.to_string()];
        lines.push(format!(
            "\nRun: start_time={} end_time={}",
            self.run.start_time, self.run.end_time
        ));
        if let Some(log_path) = &self.run.log_path {
            lines.push(format!("  log_path: {}", log_path.display()));
        }
        if let Some(upload) = &self.run.upload_path {
            lines.push(format!("  upload_path: {}", upload.display()));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(ctx: &RunContext, json_mode: bool) -> Result<()> {
    let config = ctx.load_configuration()?;
    let output_data = ShowOutput {
        document: ctx.settings.document.display().to_string(),
        config,
        run: ctx.run.clone(),
    };
    output(&output_data, json_mode);
    Ok(())
}
