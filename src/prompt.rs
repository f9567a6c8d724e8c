//! Interactive prompts

use inquire::validator::Validation;
use inquire::{Confirm, InquireError, Select, Text};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Escape or Ctrl-C
    #[error("prompt cancelled")]
    Cancelled,
    #[error("{0}")]
    Failed(String),
}

impl From<InquireError> for PromptError {
    fn from(e: InquireError) -> Self {
        match e {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Cancelled
            }
            other => PromptError::Failed(other.to_string()),
        }
    }
}

/// The three kinds of question a run asks
pub trait Prompter {
    /// Free-text answer, never empty
    fn input(&mut self, message: &str) -> Result<String, PromptError>;

    /// One of `options`, returned verbatim
    fn select(&mut self, message: &str, options: Vec<String>) -> Result<String, PromptError>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;
}

/// Terminal prompts backed by `inquire`
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn input(&mut self, message: &str) -> Result<String, PromptError> {
        let answer = Text::new(message)
            .with_validator(|input: &str| {
                Ok(if input.trim().is_empty() {
                    Validation::Invalid("A project path is required (owner/name)".into())
                } else {
                    Validation::Valid
                })
            })
            .prompt()?;
        Ok(answer)
    }

    fn select(&mut self, message: &str, options: Vec<String>) -> Result<String, PromptError> {
        Ok(Select::new(message, options).prompt()?)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        Ok(Confirm::new(message).with_default(default).prompt()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_and_interrupt_are_cancellation() {
        assert!(matches!(
            PromptError::from(InquireError::OperationCanceled),
            PromptError::Cancelled
        ));
        assert!(matches!(
            PromptError::from(InquireError::OperationInterrupted),
            PromptError::Cancelled
        ));
    }

    #[test]
    fn missing_terminal_is_a_failure() {
        assert!(matches!(
            PromptError::from(InquireError::NotTTY),
            PromptError::Failed(_)
        ));
    }
}
