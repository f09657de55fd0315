//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::SprigTheme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.green} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (for quiet mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let line = SprigTheme::new().format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = SprigTheme::new().format_error(msg);
        self.finish_with(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner() {
        let spinner = ProgressSpinner::hidden();
        assert!(spinner.bar.is_hidden());
    }

    #[test]
    fn spinner_finish_success() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.finish_success("Done");
        assert!(spinner.bar.is_finished());
    }

    #[test]
    fn spinner_finish_error() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.finish_error("Failed");
        assert!(spinner.bar.message().contains("Failed"));
    }

    #[test]
    fn spinner_set_message() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.set_message("Installing packages");
        assert_eq!(spinner.bar.message(), "Installing packages");
    }
}
