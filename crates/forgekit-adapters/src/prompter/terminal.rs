//! Terminal prompter over `dialoguer`.

use dialoguer::{MultiSelect, Select, theme::ColorfulTheme};

use forgekit_core::{
    application::ApplicationError,
    application::ports::{MultiSelectPrompt, Prompter, SelectPrompt},
    error::ForgeResult,
};

/// Interactive prompter for a real terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn multi_select(&self, prompt: &MultiSelectPrompt) -> ForgeResult<Vec<String>> {
        let items: Vec<&str> = prompt.choices.iter().map(|c| c.label).collect();
        let defaults: Vec<bool> = prompt.choices.iter().map(|c| c.checked).collect();

        let picked = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.message)
            .items(&items)
            .defaults(&defaults)
            .interact()
            .map_err(|e| ApplicationError::PromptFailed {
                reason: e.to_string(),
            })?;

        Ok(picked
            .into_iter()
            .map(|idx| prompt.choices[idx].value.to_string())
            .collect())
    }

    fn select(&self, prompt: &SelectPrompt) -> ForgeResult<String> {
        let items: Vec<&str> = prompt.choices.iter().map(|c| c.label).collect();

        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.message)
            .items(&items)
            .default(0)
            .interact()
            .map_err(|e| ApplicationError::PromptFailed {
                reason: e.to_string(),
            })?;

        Ok(prompt.choices[picked].value.to_string())
    }
}
