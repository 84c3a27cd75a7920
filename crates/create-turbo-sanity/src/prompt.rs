//! dialoguer-backed operator prompts

use dialoguer::{Confirm, Input, Select};
use turbo_sanity_core::{Error, Result};
use turbo_sanity_provision::{Prompter, Validator};

/// Prompter that reads from the attached terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(
        &self,
        message: &str,
        default: Option<&str>,
        validate: Option<Validator<'_>>,
    ) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(message);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        if let Some(validate) = validate {
            input = input.validate_with(move |value: &String| validate(value.as_str()));
        }

        input
            .interact_text()
            .map_err(|e| Error::prompt(e.to_string()))
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(|e| Error::prompt(e.to_string()))
    }

    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()
            .map_err(|e| Error::prompt(e.to_string()))
    }
}
