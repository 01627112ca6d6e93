//! The on-screen button grid, as data.
//!
//! Rendering is left to the host; this only fixes which buttons exist, their
//! labels, and the command each one issues.

use crate::calculator::SQRT_TOKEN;
use crate::session::Command;

/// A calculator button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    AllClear,
    Backspace,
    /// A digit key. Only `0..=9` is valid; build it with [`Button::digit`].
    Digit(u8),
    Divide,
    Multiply,
    Subtract,
    Add,
    Equals,
    Percent,
    Power,
    SquareRoot,
}

/// Buttons in grid order, four per row.
pub const KEYPAD: [Button; 20] = [
    Button::AllClear,
    Button::Backspace,
    Button::Divide,
    Button::Digit(7),
    Button::Digit(8),
    Button::Digit(9),
    Button::Digit(4),
    Button::Digit(5),
    Button::Digit(6),
    Button::Digit(1),
    Button::Digit(2),
    Button::Digit(3),
    Button::Digit(0),
    Button::Multiply,
    Button::Subtract,
    Button::Add,
    Button::Equals,
    Button::Percent,
    Button::Power,
    Button::SquareRoot,
];

impl Button {
    /// The button for a single decimal digit, or `None` above 9.
    pub fn digit(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self::Digit(value))
    }

    /// Text printed on the button.
    pub fn label(&self) -> String {
        match self {
            Self::AllClear => "AC".to_string(),
            Self::Backspace => "C".to_string(),
            Self::Digit(d) => d.to_string(),
            Self::Divide => "÷".to_string(),
            Self::Multiply => "×".to_string(),
            Self::Subtract => "-".to_string(),
            Self::Add => "+".to_string(),
            Self::Equals => "=".to_string(),
            Self::Percent => "%".to_string(),
            Self::Power => "^".to_string(),
            Self::SquareRoot => "√".to_string(),
        }
    }

    /// Command issued when the button is activated.
    pub fn command(&self) -> Command {
        match self {
            Self::AllClear => Command::Clear,
            Self::Backspace => Command::Backspace,
            Self::Digit(d) => Command::Append(d.to_string()),
            Self::Divide => Command::Append("/".to_string()),
            Self::Multiply => Command::Append("*".to_string()),
            Self::Subtract => Command::Append("-".to_string()),
            Self::Add => Command::Append("+".to_string()),
            Self::Equals => Command::Evaluate,
            Self::Percent => Command::Append("%".to_string()),
            Self::Power => Command::Append("^".to_string()),
            Self::SquareRoot => Command::Append(SQRT_TOKEN.to_string()),
        }
    }
}
