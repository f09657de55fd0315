//! External command execution.
//!
//! Package managers are spawned directly with an argument vector, never
//! through a shell, so package names from the registry are passed through
//! verbatim and cannot be interpreted as shell syntax.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Result, SprigError};

/// Result of running an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Last non-empty line of stderr, falling back to stdout.
    pub fn failure_summary(&self) -> String {
        let last_line = |text: &str| {
            text.lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
        };

        last_line(&self.stderr)
            .or_else(|| last_line(&self.stdout))
            .unwrap_or_else(|| match self.exit_code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            })
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout and stderr (if false, both are inherited).
    pub capture: bool,
}

/// Runs external programs.
///
/// The seam between the installer and the operating system; tests swap in
/// a recording runner.
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`.
    ///
    /// Returns `Err` only if the program could not be started. A non-zero
    /// exit is reported through [`CommandResult::success`].
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandResult>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    /// Let the child write straight to the terminal.
    pub inherit_output: bool,
}

impl ProcessRunner {
    /// Runner that captures output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that shows the child's output as it happens.
    pub fn inheriting() -> Self {
        Self {
            inherit_output: true,
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandResult> {
        let options = CommandOptions {
            cwd: Some(cwd.to_path_buf()),
            capture: !self.inherit_output,
        };
        execute(program, args, &options)
    }
}

/// Execute `program` with `args`.
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(executable_name(program));
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    if options.capture {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }
    cmd.stdin(Stdio::null());

    tracing::debug!("Running {} {}", program, args.join(" "));

    let output = cmd
        .output()
        .map_err(|e| SprigError::PackageManagerFailure {
            manager: program.to_string(),
            message: format!("could not start {}: {}", program, e),
        })?;

    let result = CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    };

    tracing::debug!(
        "{} finished in {:?} (exit {:?})",
        program,
        result.duration,
        result.exit_code
    );

    Ok(result)
}

/// Node package managers ship as `.cmd` shims on Windows.
fn executable_name(program: &str) -> String {
    if cfg!(target_os = "windows") && Path::new(program).extension().is_none() {
        format!("{}.cmd", program)
    } else {
        program.to_string()
    }
}
