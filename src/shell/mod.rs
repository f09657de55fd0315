//! Process execution and platform integration.

pub mod command;
pub mod interrupt;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult, CommandRunner, ProcessRunner};
pub use interrupt::{install_sigint, process_flag, InterruptFlag};
pub use platform::is_ci;
