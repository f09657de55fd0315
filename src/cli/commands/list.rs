//! List command implementation.
//!
//! The `sprig list` command shows the UI components a registry offers.

use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::config::{config_exists, load_config};
use crate::error::{Result, SprigError};
use crate::registry::{open_source, ComponentEntry, RegistryIndex};
use crate::ui::theme::SprigTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    args: ListArgs,
    registry: Option<String>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            registry: None,
        }
    }

    /// List this registry instead of the configured one.
    pub fn with_registry(mut self, registry: Option<String>) -> Self {
        self.registry = registry;
        self
    }

    fn fetch(&self) -> Result<RegistryIndex> {
        // Listing works before `sprig init`; the config only picks the registry.
        let config = if config_exists(&self.project_root) {
            Some(load_config(&self.project_root)?)
        } else {
            None
        };
        let source = open_source(
            self.registry.as_deref(),
            config.as_ref().and_then(|c| c.registry.as_ref()),
            &self.project_root,
        )?;
        source.fetch_index()
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let index = self.fetch()?;
        let components: Vec<&ComponentEntry> = index.iter().filter(|e| e.is_ui()).collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&components)
                .map_err(|e| SprigError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if components.is_empty() {
            ui.message("No components found in the registry.");
            return Ok(CommandResult::success());
        }

        let theme = SprigTheme::new();
        ui.show_header("Components");
        for entry in components {
            ui.message(&format!("  {}", theme.highlight.apply_to(&entry.name)));
            ui.message(&format!(
                "    {}",
                theme.dim.apply_to(format!("files: {}", entry.files.join(", ")))
            ));
            let packages: Vec<&str> = entry
                .dependencies
                .iter()
                .chain(&entry.dev_dependencies)
                .map(String::as_str)
                .collect();
            if !packages.is_empty() {
                ui.message(&format!(
                    "    {}",
                    theme.dim.apply_to(format!("packages: {}", packages.join(", ")))
                ));
            }
            if !entry.registry_dependencies.is_empty() {
                let needs: Vec<&str> = entry
                    .registry_dependencies
                    .iter()
                    .map(String::as_str)
                    .collect();
                ui.message(&format!(
                    "    {}",
                    theme.dim.apply_to(format!("requires: {}", needs.join(", ")))
                ));
            }
        }

        Ok(CommandResult::success())
    }
}
