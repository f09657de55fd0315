//! Schema command implementation.
//!
//! The `sprig schema` command prints the JSON schema for `sprig.json`, for
//! editors that validate the file through its `$schema` key.

use crate::config::json_schema;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message(&json_schema());
        Ok(CommandResult::success())
    }
}
