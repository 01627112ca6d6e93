//! Maps physical key presses to calculator commands.

use crate::session::Command;

/// A key press reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    Enter,
    Backspace,
    Escape,
    /// Any other named key (arrows, function keys, modifiers...).
    Other(String),
}

impl Key {
    /// Parse a DOM-style key name such as `"Enter"`, `"7"` or `"ArrowUp"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            "Backspace" => Self::Backspace,
            "Escape" | "Esc" => Self::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(name.to_string()),
                }
            }
        }
    }
}

/// What the host should do in response to a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub command: Command,
    /// Whether the host should suppress the key's default action.
    pub prevent_default: bool,
}

impl Dispatch {
    fn new(command: Command) -> Self {
        Self {
            command,
            prevent_default: false,
        }
    }
}

/// Translate a key into a command. Unrecognized keys yield `None`.
pub fn dispatch(key: &Key) -> Option<Dispatch> {
    let dispatch = match key {
        Key::Char(c @ ('0'..='9' | '+' | '-' | '*' | '/' | '%' | '^' | '.' | '(' | ')')) => {
            Dispatch::new(Command::Append(c.to_string()))
        }
        Key::Enter => Dispatch {
            command: Command::Evaluate,
            prevent_default: true,
        },
        Key::Backspace => Dispatch::new(Command::Backspace),
        Key::Escape => Dispatch::new(Command::Clear),
        Key::Char(_) | Key::Other(_) => return None,
    };

    tracing::debug!(?key, command = ?dispatch.command, "Dispatched key");
    Some(dispatch)
}
