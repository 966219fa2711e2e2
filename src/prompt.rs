//! Operator confirmation behind the [`Confirm`] capability.
use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;

/// Asks the operator a yes/no question.
///
/// The file materializer and the code checkout step depend on this trait
/// rather than on the terminal, so tests can script the answers.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm: Send + Sync {
    /// Ask `question` and return the operator's answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be shown or read (e.g. stdin is
    /// not a terminal).
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Interactive terminal prompt. Pressing enter accepts.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, question: &str) -> Result<bool> {
        let answer = dialoguer::Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(true)
            .interact()?;
        Ok(answer)
    }
}

/// Answers yes to every question (`--yes`).
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, question: &str) -> Result<bool> {
        tracing::debug!("assuming yes: {question}");
        Ok(true)
    }
}

/// Replays a fixed list of answers and records every question asked.
///
/// Once the script is exhausted every further question is answered `no`.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    /// Create a script that answers with `answers` in order.
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order.
    #[must_use]
    pub fn asked(&self) -> Vec<String> {
        self.asked
            .lock()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, question: &str) -> Result<bool> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(question.to_string());
        }
        let answer = self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .unwrap_or(false);
        Ok(answer)
    }
}
