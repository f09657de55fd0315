//! Init command implementation.
//!
//! The `sprig init` command writes a default `sprig.json`.

use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{config_exists, save_config, ComponentsConfig};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn build_config(&self) -> ComponentsConfig {
        let mut config = ComponentsConfig::default();
        if let Some(dir) = &self.args.components_dir {
            config.components_dir = dir.trim_end_matches('/').to_string();
        }
        config
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if config_exists(&self.project_root) && !self.args.force {
            ui.warning("Configuration already exists. Use --force to overwrite.");
            return Ok(CommandResult::failure(1));
        }

        let config = self.build_config();
        let path = save_config(&self.project_root, &config)?;
        tracing::info!("Wrote {}", path.display());

        ui.success(&format!("Created {}", path.display()));
        ui.message(&format!("Components will be added to {}", config.components_dir));
        ui.message("Next: sprig add <component>");

        Ok(CommandResult::success())
    }
}
