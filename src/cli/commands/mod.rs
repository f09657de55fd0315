//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed to by
//! [`CommandDispatcher`].

pub mod add;
pub mod completions;
pub mod dispatcher;
pub mod init;
pub mod list;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
