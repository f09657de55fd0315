//! Sprig CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sprig::cli::{Cli, CommandDispatcher, Commands};
use sprig::config::find_project_root;
use sprig::shell::{install_sigint, is_ci};
use sprig::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("sprig=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sprig=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// The project directory: `--cwd`, else the nearest ancestor holding
/// `sprig.json`, else the current directory.
///
/// `init` never walks upward, so it always creates the file where it runs.
fn project_root(cli: &Cli) -> PathBuf {
    let current = std::env::current_dir().unwrap_or_default();
    match &cli.cwd {
        Some(dir) => current.join(dir),
        None if matches!(cli.command, Commands::Init(_)) => current,
        None => find_project_root(&current).unwrap_or(current),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    install_sigint();

    tracing::debug!("Sprig starting with args: {:?}", cli);

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let project_root = project_root(&cli);
    tracing::debug!("Project root: {}", project_root.display());

    let mut ui = create_ui(!is_ci(), output_mode);

    let dispatcher = CommandDispatcher::new(project_root);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code.clamp(0, 255) as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
