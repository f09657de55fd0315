//! Install results and the end-of-run summary.

use std::path::Path;

use crate::materialize::{FileAction, FileOutcome};
use crate::ui::UserInterface;

/// Result of installing one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub name: String,
    pub success: bool,
    /// Why the component failed.
    pub error: Option<String>,
    /// Per-file results (empty on failure).
    pub files: Vec<FileOutcome>,
}

impl InstallOutcome {
    /// A component whose files were all handled.
    pub fn succeeded(name: &str, files: Vec<FileOutcome>) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            error: None,
            files,
        }
    }

    /// A component that could not be installed.
    pub fn failed(name: &str, error: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            error: Some(error.to_string()),
            files: Vec::new(),
        }
    }

    /// Files that were left untouched because the user declined.
    pub fn skipped_files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files
            .iter()
            .filter(|f| f.action == FileAction::Skipped)
    }
}

/// Everything that happened in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// One entry per resolved component that was attempted.
    pub outcomes: Vec<InstallOutcome>,
    /// Package install commands that ran successfully.
    pub package_installs: Vec<String>,
    /// Package install problems.
    pub package_failures: Vec<String>,
    /// The user declined the confirmation; nothing was changed.
    pub cancelled: bool,
    /// Ctrl-C stopped the component loop early.
    pub interrupted: bool,
    /// Components not attempted because of an interrupt.
    pub not_attempted: Vec<String>,
    /// Tailwind plugins the installed components expect.
    pub tailwind_plugins: Vec<String>,
}

impl InstallReport {
    /// A run the user called off at the confirmation prompt.
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Default::default()
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &InstallOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    pub fn successes(&self) -> impl Iterator<Item = &InstallOutcome> {
        self.outcomes.iter().filter(|o| o.success)
    }

    /// Whether any component failed.
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Process exit code for this run.
    ///
    /// 130 after an interrupt, 1 if any component failed, else 0.
    /// Package failures are reported but do not change the exit code.
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            130
        } else if self.has_failures() {
            1
        } else {
            0
        }
    }

    /// Print the summary.
    pub fn render(&self, ui: &mut dyn UserInterface, project_root: &Path) {
        if self.cancelled {
            ui.message("Cancelled. No changes were made.");
            return;
        }

        for outcome in self.successes() {
            let written = outcome.files.iter().filter(|f| f.written()).count();
            let skipped = outcome.files.len() - written;
            let detail = if skipped > 0 {
                format!(" ({} file(s) skipped)", skipped)
            } else {
                String::new()
            };
            ui.success(&format!("{}{}", outcome.name, detail));

            for file in &outcome.files {
                let path = display_path(&file.path, project_root);
                match file.action {
                    FileAction::Created => ui.message(&format!("    + {}", path)),
                    FileAction::Overwritten => ui.message(&format!("    ~ {}", path)),
                    FileAction::Skipped => ui.message(&format!("    - {} (kept)", path)),
                }
                for warning in &file.warnings {
                    ui.warning(&format!("{}: {}", path, warning));
                }
            }
        }

        for outcome in self.failures() {
            ui.error(&format!(
                "{}: {}",
                outcome.name,
                outcome.error.as_deref().unwrap_or("failed")
            ));
        }

        for failure in &self.package_failures {
            ui.warning(failure);
        }

        if self.interrupted {
            ui.warning(&format!(
                "Interrupted. Not installed: {}",
                self.not_attempted.join(", ")
            ));
        }

        if !self.tailwind_plugins.is_empty() {
            ui.message(&format!(
                "\nThese components use Tailwind plugins. Add them to your Tailwind config: {}",
                self.tailwind_plugins.join(", ")
            ));
        }

        let total = self.outcomes.len();
        let failed = self.failures().count();
        if failed == 0 && !self.interrupted {
            ui.message(&format!("\nDone. {} component(s) installed.", total));
        } else {
            ui.message(&format!(
                "\n{} of {} component(s) installed, {} failed.",
                total - failed,
                total,
                failed
            ));
        }
    }
}

fn display_path(path: &Path, project_root: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::path::PathBuf;

    fn file(name: &str, action: FileAction) -> FileOutcome {
        FileOutcome {
            file_id: format!("ui/{}", name),
            path: PathBuf::from("/app/components/ui").join(name),
            action,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn exit_code_zero_without_failures() {
        let report = InstallReport {
            outcomes: vec![InstallOutcome::succeeded(
                "button",
                vec![file("button.tsx", FileAction::Created)],
            )],
            package_failures: vec!["npm failed".to_string()],
            ..Default::default()
        };
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn exit_code_one_with_failed_component() {
        let report = InstallReport {
            outcomes: vec![
                InstallOutcome::succeeded("button", vec![]),
                InstallOutcome::failed("card", "disk full"),
            ],
            ..Default::default()
        };
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn exit_code_for_interrupt() {
        let report = InstallReport {
            interrupted: true,
            ..Default::default()
        };
        assert_eq!(report.exit_code(), 130);
    }

    #[test]
    fn cancelled_report_is_clean() {
        let report = InstallReport::cancelled();
        assert_eq!(report.exit_code(), 0);

        let mut ui = MockUI::new();
        report.render(&mut ui, Path::new("/app"));
        assert!(ui.has_message("Cancelled"));
    }

    #[test]
    fn render_lists_successes_and_failures() {
        let report = InstallReport {
            outcomes: vec![
                InstallOutcome::succeeded(
                    "button",
                    vec![
                        file("button.tsx", FileAction::Created),
                        file("button-group.tsx", FileAction::Skipped),
                    ],
                ),
                InstallOutcome::failed("card", "Failed to write card.tsx: denied"),
            ],
            package_failures: vec!["npm failed to install packages: 404".to_string()],
            tailwind_plugins: vec!["tailwindcss-animate".to_string()],
            ..Default::default()
        };
        let mut ui = MockUI::new();

        report.render(&mut ui, Path::new("/app"));

        assert!(ui.has_success("button (1 file(s) skipped)"));
        assert!(ui.has_message("+ components/ui/button.tsx"));
        assert!(ui.has_message("- components/ui/button-group.tsx (kept)"));
        assert!(ui.has_error("card: Failed to write card.tsx"));
        assert!(ui.has_warning("404"));
        assert!(ui.has_message("tailwindcss-animate"));
        assert!(ui.has_message("1 of 2 component(s) installed, 1 failed."));
    }

    #[test]
    fn render_reports_interrupt() {
        let report = InstallReport {
            outcomes: vec![InstallOutcome::succeeded("card", vec![])],
            interrupted: true,
            not_attempted: vec!["button".to_string()],
            ..Default::default()
        };
        let mut ui = MockUI::new();

        report.render(&mut ui, Path::new("/app"));

        assert!(ui.has_warning("Not installed: button"));
    }

    #[test]
    fn skipped_files_are_listed() {
        let outcome = InstallOutcome::succeeded(
            "button",
            vec![
                file("a.tsx", FileAction::Skipped),
                file("b.tsx", FileAction::Overwritten),
            ],
        );
        assert_eq!(outcome.skipped_files().count(), 1);
    }
}
