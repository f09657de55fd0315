//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use sprig::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("proceed", "no");
//!
//! let answer = ui.prompt(&Prompt::confirm("proceed", "Proceed?", true)).unwrap();
//! assert_eq!(answer.as_bool(), Some(false));
//!
//! ui.success("Done!");
//! assert!(ui.has_success("Done"));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked multiple times.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
    /// Fallback response for any prompt key not otherwise configured.
    default_prompt_response: Option<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set a default response for any prompt key not explicitly configured.
    ///
    /// Useful for overwrite prompts, whose key includes the file name.
    pub fn set_default_prompt_response(&mut self, response: &str) {
        self.default_prompt_response = Some(response.to_string());
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    fn configured_response(&mut self, key: &str) -> Option<String> {
        if let Some(response) = self
            .prompt_queues
            .get_mut(key)
            .and_then(|queue| queue.pop_front())
        {
            return Some(response);
        }
        self.prompt_responses
            .get(key)
            .or(self.default_prompt_response.as_ref())
            .cloned()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        OutputMode::Normal
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let response = self
            .configured_response(&prompt.key)
            .or_else(|| prompt.default.clone());

        Ok(match (&prompt.prompt_type, response) {
            (PromptType::Confirm, Some(r)) => {
                PromptResult::Bool(matches!(r.as_str(), "true" | "yes" | "y" | "1"))
            }
            (PromptType::Confirm, None) => PromptResult::Bool(false),
            (PromptType::MultiSelect { .. }, Some(r)) => {
                PromptResult::Strings(PromptResult::String(r).as_strings())
            }
            (PromptType::MultiSelect { .. }, None) => PromptResult::Strings(Vec::new()),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    succeeded: Option<bool>,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// `Some(true)` after `finish_success`, `Some(false)` after `finish_error`.
    pub fn succeeded(&self) -> Option<bool> {
        self.succeeded
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.succeeded = Some(true);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.succeeded = Some(false);
    }
}
