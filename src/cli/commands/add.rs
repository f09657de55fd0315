//! Add command implementation.
//!
//! The `sprig add` command installs components and their packages into the
//! project.

use std::path::{Path, PathBuf};

use crate::cli::args::AddArgs;
use crate::config::{config_exists, load_config};
use crate::error::{Result, SprigError};
use crate::install::{InstallRequest, Installer};
use crate::registry::open_source;
use crate::shell::{process_flag, ProcessRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The add command implementation.
pub struct AddCommand {
    project_root: PathBuf,
    args: AddArgs,
    registry: Option<String>,
    verbose: bool,
}

impl AddCommand {
    /// Create a new add command.
    pub fn new(project_root: &Path, args: AddArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            registry: None,
            verbose: false,
        }
    }

    /// Install from this registry instead of the configured one.
    pub fn with_registry(mut self, registry: Option<String>) -> Self {
        self.registry = registry;
        self
    }

    /// Stream package manager output to the terminal.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn request(&self) -> InstallRequest {
        InstallRequest {
            components: self.args.components.clone(),
            all: self.args.all,
            yes: self.args.yes,
            overwrite: self.args.overwrite,
            target: self.args.path.clone(),
            package_manager: self.args.package_manager.clone(),
        }
    }
}

impl Command for AddCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !config_exists(&self.project_root) {
            ui.error("Project not initialized. Run: sprig init");
            return Ok(CommandResult::failure(1));
        }
        let config = load_config(&self.project_root)?;

        let source = open_source(
            self.registry.as_deref(),
            config.registry.as_ref(),
            &self.project_root,
        )?;
        let runner = if self.verbose {
            ProcessRunner::inheriting()
        } else {
            ProcessRunner::new()
        };

        let mut installer = Installer::new(source.as_ref(), &runner, &config, &self.project_root)
            .with_interrupt(process_flag());

        match installer.run(&self.request(), ui) {
            Ok(report) => Ok(CommandResult::from_exit_code(report.exit_code())),
            Err(SprigError::Interrupted) => {
                ui.warning("Interrupted. No changes were made.");
                Ok(CommandResult::failure(130))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn local_registry(root: &Path) {
        let registry = root.join("registry");
        fs::create_dir_all(registry.join("components/ui")).unwrap();
        fs::write(
            registry.join("registry.json"),
            r#"{
                "button": {"type": "components:ui", "files": ["ui/button.tsx"]},
                "utils": {"files": ["lib/utils.ts"]}
            }"#,
        )
        .unwrap();
        fs::write(
            registry.join("components/ui/button.tsx"),
            "import { cn } from \"@/lib/utils\"\nexport function Button() {}\n",
        )
        .unwrap();
    }

    fn args(names: &[&str]) -> AddArgs {
        AddArgs {
            components: names.iter().map(|s| s.to_string()).collect(),
            yes: true,
            ..Default::default()
        }
    }

    #[test]
    fn add_requires_init() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = AddCommand::new(temp.path(), args(&["button"]))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("sprig init"));
    }

    #[test]
    fn add_from_local_registry() {
        let temp = TempDir::new().unwrap();
        local_registry(temp.path());
        fs::write(temp.path().join("sprig.json"), "{}").unwrap();
        let mut ui = MockUI::new();

        let result = AddCommand::new(temp.path(), args(&["button"]))
            .with_registry(Some("registry".to_string()))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let written =
            fs::read_to_string(temp.path().join("components/ui/button.tsx")).unwrap();
        assert!(written.contains("@/lib/utils"));
    }

    #[test]
    fn add_to_custom_path() {
        let temp = TempDir::new().unwrap();
        local_registry(temp.path());
        fs::write(temp.path().join("sprig.json"), "{}").unwrap();
        let mut add = args(&["button"]);
        add.path = Some(PathBuf::from("src/widgets"));
        let mut ui = MockUI::new();

        AddCommand::new(temp.path(), add)
            .with_registry(Some("registry".to_string()))
            .execute(&mut ui)
            .unwrap();

        assert!(temp.path().join("src/widgets/button.tsx").exists());
    }

    #[test]
    fn missing_local_registry_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sprig.json"), "{}").unwrap();
        let mut ui = MockUI::new();

        let err = AddCommand::new(temp.path(), args(&["button"]))
            .with_registry(Some("nowhere".to_string()))
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, SprigError::RegistryUnavailable { .. }));
        assert!(!temp.path().join("components").exists());
    }
}
