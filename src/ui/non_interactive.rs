//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{Result, SprigError};

use super::theme::SprigTheme;
use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts.
const PROMPT_ENV_PREFIX: &str = "SPRIG_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `SPRIG_PROMPT_<KEY>` environment variables,
/// falling back to the prompt's default. Spinners print their message
/// once instead of animating.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    /// The environment variable that answers `key`.
    ///
    /// `overwrite_button.tsx` -> `SPRIG_PROMPT_OVERWRITE_BUTTON_TSX`
    pub fn env_key(key: &str) -> String {
        let suffix: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", PROMPT_ENV_PREFIX, suffix)
    }
}

fn answer(prompt: &Prompt, value: &str) -> PromptResult {
    match prompt.prompt_type {
        PromptType::Confirm => PromptResult::Bool(super::parse_yes(value)),
        PromptType::MultiSelect { .. } => PromptResult::String(value.to_string()),
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        if let Some(value) = self.env_overrides.get(&Self::env_key(&prompt.key)) {
            return Ok(answer(prompt, value));
        }

        if let Some(default) = &prompt.default {
            return Ok(answer(prompt, default));
        }

        Err(SprigError::Other(anyhow::anyhow!(
            "Cannot prompt for '{}' in non-interactive mode (no default value)",
            prompt.key
        )))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints only its final line.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("{}", SprigTheme::plain().format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", SprigTheme::plain().format_error(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn confirm_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());

        let proceed = ui
            .prompt(&Prompt::confirm("proceed", "Proceed?", true))
            .unwrap();
        let overwrite = ui
            .prompt(&Prompt::confirm("overwrite_button.tsx", "Overwrite?", false))
            .unwrap();

        assert_eq!(proceed.as_bool(), Some(true));
        assert_eq!(overwrite.as_bool(), Some(false));
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "SPRIG_PROMPT_OVERWRITE_BUTTON_TSX".to_string(),
            "yes".to_string(),
        );
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);

        let result = ui
            .prompt(&Prompt::confirm("overwrite_button.tsx", "Overwrite?", false))
            .unwrap();

        assert_eq!(result.as_bool(), Some(true));
    }

    #[test]
    fn multiselect_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("SPRIG_PROMPT_COMPONENTS".to_string(), "button,card".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = Prompt {
            key: "components".to_string(),
            question: "Which components?".to_string(),
            prompt_type: PromptType::MultiSelect {
                options: vec![PromptOption {
                    label: "button".to_string(),
                    value: "button".to_string(),
                }],
            },
            default: None,
        };

        let result = ui.prompt(&prompt).unwrap();

        assert_eq!(result.as_strings(), vec!["button", "card"]);
    }

    #[test]
    fn prompt_fails_without_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt {
            key: "components".to_string(),
            question: "Which?".to_string(),
            prompt_type: PromptType::MultiSelect { options: vec![] },
            default: None,
        };

        assert!(ui.prompt(&prompt).is_err());
    }

    #[test]
    fn env_key_is_sanitized() {
        assert_eq!(
            NonInteractiveUI::env_key("overwrite_use-toast.ts"),
            "SPRIG_PROMPT_OVERWRITE_USE_TOAST_TS"
        );
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
