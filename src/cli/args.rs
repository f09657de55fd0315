//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Sprig - Copy UI components from a registry into your project.
#[derive(Debug, Parser)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project directory (defaults to the nearest directory with sprig.json)
    #[arg(short = 'c', long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Registry URL or local registry directory
    #[arg(long, global = true, env = "SPRIG_REGISTRY")]
    pub registry: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create sprig.json for this project
    Init(InitArgs),

    /// Add components to the project
    Add(AddArgs),

    /// List components available in the registry
    List(ListArgs),

    /// Print the JSON schema for sprig.json
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite an existing sprig.json
    #[arg(short, long)]
    pub force: bool,

    /// Directory components are written to
    #[arg(long, value_name = "DIR")]
    pub components_dir: Option<String>,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Components to add
    pub components: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub overwrite: bool,

    /// Add every component in the registry
    #[arg(short, long, conflicts_with = "components")]
    pub all: bool,

    /// Write components here instead of the configured directory
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Package manager to install dependencies with (npm, pnpm, yarn, bun)
    #[arg(long, value_name = "NAME", env = "SPRIG_PACKAGE_MANAGER")]
    pub package_manager: Option<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Print the registry index as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
