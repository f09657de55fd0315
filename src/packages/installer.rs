//! Installing npm packages through a package manager.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::PackageManager;
use crate::error::{Result, SprigError};
use crate::shell::CommandRunner;

/// Runs package-manager installs in a project.
pub struct PackageInstaller<'a> {
    runner: &'a dyn CommandRunner,
    manager: PackageManager,
    project_root: PathBuf,
}

impl<'a> PackageInstaller<'a> {
    pub fn new(runner: &'a dyn CommandRunner, manager: PackageManager, project_root: &Path) -> Self {
        Self {
            runner,
            manager,
            project_root: project_root.to_path_buf(),
        }
    }

    /// Install `packages` in one invocation. Does nothing if empty.
    ///
    /// # Errors
    ///
    /// `PackageManagerFailure` if the manager cannot be started or exits
    /// non-zero.
    pub fn install(&self, packages: &BTreeSet<String>, dev: bool) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let packages: Vec<&str> = packages.iter().map(String::as_str).collect();
        let args = self.manager.install_args(dev, &packages);
        tracing::info!("Running {}", self.manager.command_line(dev, &packages));

        let result = self
            .runner
            .run(self.manager.program(), &args, &self.project_root)?;

        if !result.success {
            return Err(SprigError::PackageManagerFailure {
                manager: self.manager.to_string(),
                message: result.failure_summary(),
            });
        }

        Ok(())
    }
}
