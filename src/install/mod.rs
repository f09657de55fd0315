//! The install run.
//!
//! [`Installer`] drives one `sprig add`:
//!
//! 1. Fetch the registry index
//! 2. Resolve the requested components
//! 3. Show the plan and ask for confirmation
//! 4. Install npm packages
//! 5. Write each component's files
//! 6. Report
//!
//! Steps 1 and 2 fail the whole run. Steps 4 and 5 never do: a package
//! install failure is recorded and component writes go ahead, and a failed
//! component is recorded and the loop moves on to the next one.

pub mod phase;
pub mod report;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::ComponentsConfig;
use crate::error::{Result, SprigError};
use crate::materialize::{ConflictDecider, Materializer, OverwritePolicy};
use crate::packages::{PackageInstaller, PackageManagerDetector};
use crate::registry::{RegistryIndex, RegistrySource};
use crate::resolver::{resolve, ResolutionResult};
use crate::shell::{CommandRunner, InterruptFlag};
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

pub use phase::InstallPhase;
pub use report::{InstallOutcome, InstallReport};

/// What the user asked for.
#[derive(Debug, Clone, Default)]
pub struct InstallRequest {
    /// Component names. Empty means "ask" unless `all` is set.
    pub components: Vec<String>,
    /// Install every UI component in the registry.
    pub all: bool,
    /// Skip the confirmation prompt.
    pub yes: bool,
    /// Replace existing files without asking.
    pub overwrite: bool,
    /// Write here instead of the configured components directory.
    pub target: Option<PathBuf>,
    /// Package manager to use instead of detecting one.
    pub package_manager: Option<String>,
}

/// Runs an install against a registry.
pub struct Installer<'a> {
    source: &'a dyn RegistrySource,
    runner: &'a dyn CommandRunner,
    config: &'a ComponentsConfig,
    project_root: PathBuf,
    interrupt: InterruptFlag,
    phase: InstallPhase,
}

impl<'a> Installer<'a> {
    pub fn new(
        source: &'a dyn RegistrySource,
        runner: &'a dyn CommandRunner,
        config: &'a ComponentsConfig,
        project_root: &Path,
    ) -> Self {
        Self {
            source,
            runner,
            config,
            project_root: project_root.to_path_buf(),
            interrupt: InterruptFlag::new(),
            phase: InstallPhase::Idle,
        }
    }

    /// Watch `flag` for Ctrl-C between components.
    pub fn with_interrupt(mut self, flag: InterruptFlag) -> Self {
        self.interrupt = flag;
        self
    }

    /// The current phase.
    pub fn phase(&self) -> InstallPhase {
        self.phase
    }

    /// Where component files go for `request`.
    pub fn target_dir(&self, request: &InstallRequest) -> PathBuf {
        match &request.target {
            Some(path) => self.project_root.join(path),
            None => self.project_root.join(&self.config.components_dir),
        }
    }

    /// Run the install.
    ///
    /// # Errors
    ///
    /// Only errors raised before any side effect: the registry index is
    /// unavailable, a component is unknown, the graph has a cycle, or the
    /// run was interrupted before confirmation. Everything after that is
    /// recorded in the returned [`InstallReport`].
    pub fn run(
        &mut self,
        request: &InstallRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallReport> {
        self.phase = InstallPhase::Idle;
        self.advance(InstallPhase::FetchingRegistry);
        let index = self.fail_on_err(self.fetch_index(ui))?;

        self.advance(InstallPhase::Resolving);
        let requested = self.fail_on_err(self.select_components(request, &index, ui))?;
        if requested.is_empty() {
            ui.message("No components selected.");
            self.advance(InstallPhase::AwaitingConfirmation);
            self.advance(InstallPhase::Done);
            return Ok(InstallReport::default());
        }
        let resolution = match resolve(&requested, &index) {
            Ok(resolution) => resolution,
            Err(e) => {
                if matches!(e, SprigError::UnknownComponent { .. }) {
                    ui.message(&format!(
                        "Available components: {}",
                        index.ui_component_names().join(", ")
                    ));
                }
                return self.fail_on_err(Err(e));
            }
        };

        self.advance(InstallPhase::AwaitingConfirmation);
        let target_dir = self.target_dir(request);
        if !self.fail_on_err(self.confirm(&resolution, &target_dir, request, ui))? {
            self.advance(InstallPhase::Done);
            let report = InstallReport::cancelled();
            report.render(ui, &self.project_root);
            return Ok(report);
        }
        if self.interrupt.is_set() {
            self.advance(InstallPhase::Failed);
            return Err(SprigError::Interrupted);
        }

        let mut report = InstallReport {
            tailwind_plugins: resolution.tailwind_plugins.iter().cloned().collect(),
            ..Default::default()
        };

        self.advance(InstallPhase::InstallingPackages);
        self.install_packages(&resolution, request, &mut report, ui);

        self.advance(InstallPhase::InstallingComponents);
        self.install_components(&resolution, &index, request, &target_dir, &mut report, ui);

        self.advance(InstallPhase::Reporting);
        report.render(ui, &self.project_root);

        self.advance(InstallPhase::Done);
        Ok(report)
    }

    fn advance(&mut self, next: InstallPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid install transition {} -> {}",
            self.phase,
            next
        );
        tracing::debug!("Install phase: {} -> {}", self.phase, next);
        self.phase = next;
    }

    fn fail_on_err<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.advance(InstallPhase::Failed);
        }
        result
    }

    fn fetch_index(&self, ui: &mut dyn UserInterface) -> Result<RegistryIndex> {
        let mut spinner = ui.start_spinner("Fetching registry...");
        match self.source.fetch_index() {
            Ok(index) => {
                spinner.finish_success(&format!(
                    "Fetched {} component(s) from {}",
                    index.len(),
                    self.source.describe()
                ));
                Ok(index)
            }
            Err(e) => {
                spinner.finish_error("Could not fetch registry");
                Err(e)
            }
        }
    }

    fn select_components(
        &self,
        request: &InstallRequest,
        index: &RegistryIndex,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<String>> {
        if request.all {
            return Ok(index.ui_component_names());
        }
        if !request.components.is_empty() {
            return Ok(request.components.clone());
        }

        let options = index
            .ui_component_names()
            .into_iter()
            .map(|name| PromptOption {
                label: name.clone(),
                value: name,
            })
            .collect();
        let prompt = Prompt {
            key: "components".to_string(),
            question: "Which components would you like to add?".to_string(),
            prompt_type: PromptType::MultiSelect { options },
            default: None,
        };

        Ok(ui.prompt(&prompt)?.as_strings())
    }

    fn confirm(
        &self,
        resolution: &ResolutionResult,
        target_dir: &Path,
        request: &InstallRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<bool> {
        let target = target_dir
            .strip_prefix(&self.project_root)
            .unwrap_or(target_dir);
        ui.message(&format!(
            "Components: {}",
            resolution.components.join(", ")
        ));
        if !resolution.dependencies.is_empty() {
            ui.message(&format!("Packages: {}", join(&resolution.dependencies)));
        }
        if !resolution.dev_dependencies.is_empty() {
            ui.message(&format!(
                "Dev packages: {}",
                join(&resolution.dev_dependencies)
            ));
        }
        ui.message(&format!("Target: {}", target.display()));

        if request.yes {
            return Ok(true);
        }

        let answer = ui.prompt(&Prompt::confirm("proceed", "Proceed?", true))?;
        Ok(answer.as_bool().unwrap_or(false))
    }

    fn install_packages(
        &self,
        resolution: &ResolutionResult,
        request: &InstallRequest,
        report: &mut InstallReport,
        ui: &mut dyn UserInterface,
    ) {
        if !resolution.has_packages() {
            return;
        }

        let requested = request
            .package_manager
            .as_deref()
            .or(self.config.package_manager.as_deref());
        let manager = match PackageManagerDetector::detect(&self.project_root, requested) {
            Ok(manager) => manager,
            Err(e) => {
                tracing::warn!("{}", e);
                report.package_failures.push(e.to_string());
                return;
            }
        };

        let installer = PackageInstaller::new(self.runner, manager, &self.project_root);
        for (packages, dev) in [
            (&resolution.dependencies, false),
            (&resolution.dev_dependencies, true),
        ] {
            if packages.is_empty() {
                continue;
            }
            let names: Vec<&str> = packages.iter().map(String::as_str).collect();
            let command = manager.command_line(dev, &names);
            let mut spinner = ui.start_spinner(&format!("Running {}", command));
            match installer.install(packages, dev) {
                Ok(()) => {
                    spinner.finish_success(&command);
                    report.package_installs.push(command);
                }
                Err(e) => {
                    spinner.finish_error(&command);
                    tracing::warn!("{}", e);
                    report.package_failures.push(e.to_string());
                }
            }
        }
    }

    fn install_components(
        &self,
        resolution: &ResolutionResult,
        index: &RegistryIndex,
        request: &InstallRequest,
        target_dir: &Path,
        report: &mut InstallReport,
        ui: &mut dyn UserInterface,
    ) {
        let policy = if request.overwrite {
            OverwritePolicy::Force
        } else {
            OverwritePolicy::Ask
        };
        let materializer =
            Materializer::new(self.source, &self.config.aliases, target_dir, policy);

        for (i, name) in resolution.components.iter().enumerate() {
            if self.interrupt.is_set() {
                report.interrupted = true;
                report.not_attempted = resolution.components[i..].to_vec();
                tracing::info!("Interrupted before {}", name);
                break;
            }

            let Some(entry) = index.get(name) else {
                report.outcomes.push(InstallOutcome::failed(
                    name,
                    SprigError::UnknownComponent { name: name.clone() },
                ));
                continue;
            };

            tracing::debug!("Installing {}", name);
            let mut decider = PromptDecider { ui: &mut *ui };
            let outcome = match materializer.materialize(entry, &mut decider) {
                Ok(files) => InstallOutcome::succeeded(name, files),
                Err(e) => {
                    tracing::warn!("{}: {}", name, e);
                    InstallOutcome::failed(name, e)
                }
            };
            report.outcomes.push(outcome);
        }
    }
}

/// Asks the user before replacing an existing file.
struct PromptDecider<'u> {
    ui: &'u mut dyn UserInterface,
}

impl ConflictDecider for PromptDecider<'_> {
    fn should_overwrite(&mut self, target: &Path) -> Result<bool> {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prompt = Prompt::confirm(
            &format!("overwrite_{}", name),
            &format!("{} already exists. Overwrite?", target.display()),
            false,
        );
        Ok(self.ui.prompt(&prompt)?.as_bool().unwrap_or(false))
    }
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(", ")
}
