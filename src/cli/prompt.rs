//! Interactive prompts
//!
//! Command handlers ask questions through [`Prompt`] so the terminal can be
//! swapped for scripted answers.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password};

/// Source of interactive answers
pub trait Prompt {
    /// Ask for a line of text
    fn input(&self, label: &str) -> anyhow::Result<String>;

    /// Ask for a secret without echoing it
    fn password(&self, label: &str) -> anyhow::Result<String>;

    /// Ask a yes/no question (defaults to no)
    fn confirm(&self, question: &str) -> anyhow::Result<bool>;
}

/// Prompts on the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input(&self, label: &str) -> anyhow::Result<String> {
        let value = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact_text()?;
        Ok(value)
    }

    fn password(&self, label: &str) -> anyhow::Result<String> {
        let value = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact()?;
        Ok(value)
    }

    fn confirm(&self, question: &str) -> anyhow::Result<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}
