//! The calculator session: input, last result and history in one state object.
//!
//! Every user action is a [`Command`] applied to a [`Calculator`]. Keyboard
//! and keypad input go through the same path, so behavior is identical no
//! matter where the action came from.

use crate::calculator::{CalcResult, InputBuffer, MAX_FRACTION_DIGITS, evaluate_with_precision};
use crate::config::Config;
use crate::history::{
    FileStore, History, HistoryEntry, HistoryError, HistoryRepository, StoreRepository,
};
use crate::keyboard::{Key, dispatch};
use crate::keypad::Button;
use anyhow::Context;

/// An action on the calculator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Append a digit, operator, decimal point or function prefix.
    Append(String),
    /// Remove the last input character.
    Backspace,
    /// Clear both the input and the result.
    Clear,
    /// Evaluate the input into a result.
    Evaluate,
}

/// What applying a command did.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Whether the input or result changed.
    pub changed: bool,
    /// Whether the host should suppress the key's default action.
    pub prevent_default: bool,
    /// Set when a new history entry could not be saved.
    pub persist_error: Option<HistoryError>,
}

/// Snapshot of what the host should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct View<'a> {
    /// Input text, `"0"` when nothing is entered.
    pub input: &'a str,
    /// Result text, `"0"` when nothing was evaluated yet.
    pub result: &'a str,
    pub history: &'a [HistoryEntry],
}

pub struct Calculator<R> {
    input: InputBuffer,
    result: String,
    last_evaluation: Option<CalcResult>,
    history: History<R>,
    max_fraction_digits: usize,
}

impl Calculator<StoreRepository<FileStore>> {
    /// Open a calculator backed by the on-disk store described by the user config.
    pub fn open_default() -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load calculator config")?;
        let store = match &config.data_dir {
            Some(dir) => FileStore::new(dir),
            None => FileStore::in_data_dir().context("Failed to locate history directory")?,
        };
        let repository = StoreRepository::with_key(store, config.history_key.clone());
        Ok(Self::with_config(repository, &config))
    }
}

impl<R: HistoryRepository> Calculator<R> {
    /// Start a session, loading history from `repository` once.
    pub fn new(repository: R) -> Self {
        Self {
            input: InputBuffer::new(),
            result: String::new(),
            last_evaluation: None,
            history: History::load(repository),
            max_fraction_digits: MAX_FRACTION_DIGITS,
        }
    }

    pub fn with_config(repository: R, config: &Config) -> Self {
        let mut calculator = Self::new(repository);
        calculator.max_fraction_digits = config.max_fraction_digits;
        calculator
    }

    /// Apply a command to the session.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Append(token) => Outcome {
                changed: self.input.append(&token),
                ..Outcome::default()
            },
            Command::Backspace => Outcome {
                changed: self.input.backspace(),
                ..Outcome::default()
            },
            Command::Clear => {
                let changed = !self.input.is_empty() || !self.result.is_empty();
                self.input.clear();
                self.result.clear();
                Outcome {
                    changed,
                    ..Outcome::default()
                }
            }
            Command::Evaluate => self.evaluate(),
        }
    }

    /// Handle a key press. Keys with no meaning return `None`.
    pub fn press(&mut self, key: &Key) -> Option<Outcome> {
        let dispatch = dispatch(key)?;
        let mut outcome = self.apply(dispatch.command);
        outcome.prevent_default = dispatch.prevent_default;
        Some(outcome)
    }

    /// Handle a keypad button activation.
    pub fn click(&mut self, button: Button) -> Outcome {
        self.apply(button.command())
    }

    fn evaluate(&mut self) -> Outcome {
        let evaluation = evaluate_with_precision(self.input.as_str(), self.max_fraction_digits);
        self.result = evaluation.display().to_string();

        let mut outcome = Outcome {
            changed: true,
            ..Outcome::default()
        };

        if let Some(entry) = HistoryEntry::from_calc_result(&evaluation) {
            tracing::debug!(expression = %entry.expression, result = %entry.result, "Recording calculation");
            if let Err(e) = self.history.push(entry) {
                tracing::warn!("Failed to save calculator history: {}", e);
                outcome.persist_error = Some(e);
            }
        }

        self.last_evaluation = Some(evaluation);
        outcome
    }

    pub fn view(&self) -> View<'_> {
        View {
            input: self.input.display(),
            result: if self.result.is_empty() {
                "0"
            } else {
                &self.result
            },
            history: self.history.entries(),
        }
    }

    /// Raw input text (empty when nothing is entered).
    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Raw result text (empty before the first evaluation or after a clear).
    pub fn result(&self) -> &str {
        &self.result
    }

    /// The most recent evaluation, including the reason for an error.
    pub fn last_evaluation(&self) -> Option<&CalcResult> {
        self.last_evaluation.as_ref()
    }

    pub fn history(&self) -> &History<R> {
        &self.history
    }
}
