//! Schema command implementation.
//!
//! The `gearplan schema` command prints the JSON schema of the gearsets
//! file so editors can validate hand-written gearsets.

use anyhow::Context;
use schemars::schema_for;

use crate::error::Result;
use crate::model::GearsetsFile;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

/// JSON schema of the gearsets file, pretty-printed.
pub fn gearsets_schema() -> Result<String> {
    let schema = schema_for!(GearsetsFile);
    let text = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    Ok(text)
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.data(&gearsets_schema()?);
        Ok(CommandResult::success())
    }
}
