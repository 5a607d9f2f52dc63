//! Implementation of the `plugconf get` command.

use anyhow::Result;
use serde::Serialize;

use super::RunContext;
use crate::cli::output::{inline_value, output, CommandOutput};
use crate::domain::models::resolved::Setting;

#[derive(Debug, Serialize)]
pub struct GetOutput {
    pub path: String,
    pub value: serde_json::Value,
}

impl CommandOutput for GetOutput {
    fn to_human(&self) -> String {
        inline_value(&self.value)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(ctx: &RunContext, path: &str, json_mode: bool) -> Result<()> {
    let config = ctx.load_configuration()?;
    let value = match config.require(path)? {
        Setting::Value(v) => v.clone(),
        Setting::Plugins(tree) => serde_json::to_value(tree)?,
    };
    output(
        &GetOutput {
            path: path.to_string(),
            value,
        },
        json_mode,
    );
    Ok(())
}
