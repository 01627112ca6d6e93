//! The in-progress expression and its append rules.

use super::detection::{ends_with_operator, is_operator, trailing_number};

/// Token appended by the square-root key.
pub const SQRT_TOKEN: &str = "sqrt(";

/// Expression text being built from key presses and button clicks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token, returning whether it was accepted.
    ///
    /// Rejected tokens leave the buffer untouched:
    /// - an operator directly after another operator
    /// - a decimal point when the current number already has one
    pub fn append(&mut self, token: &str) -> bool {
        let Some(first) = token.chars().next() else {
            return false;
        };

        if is_operator(first) && ends_with_operator(&self.text) {
            return false;
        }

        if token.contains('.') && trailing_number(&self.text).contains('.') {
            return false;
        }

        self.text.push_str(token);
        true
    }

    /// Remove the last character. Returns `false` if the buffer was empty.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text to show in the input display; `"0"` when nothing is entered.
    pub fn display(&self) -> &str {
        if self.text.is_empty() { "0" } else { &self.text }
    }
}

impl From<&str> for InputBuffer {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(tokens: &[&str]) -> InputBuffer {
        let mut buffer = InputBuffer::new();
        for token in tokens {
            buffer.append(token);
        }
        buffer
    }

    #[test]
    fn test_consecutive_operators_rejected() {
        for first in ["+", "-", "*", "/", "%", "^"] {
            for second in ["+", "-", "*", "/", "%", "^"] {
                let mut buffer = typed(&["7", first]);
                let before = buffer.clone();
                assert!(!buffer.append(second), "{first}{second} accepted");
                assert_eq!(buffer, before);
            }
        }
    }

    #[test]
    fn test_second_decimal_point_rejected() {
        let mut buffer = typed(&["1", ".", "5"]);
        assert!(!buffer.append("."));
        assert_eq!(buffer.as_str(), "1.5");

        // A new number after an operator may have its own decimal point.
        assert!(buffer.append("+"));
        assert!(buffer.append("."));
        assert_eq!(buffer.as_str(), "1.5+.");
        assert!(!buffer.append("."));
    }

    #[test]
    fn test_sqrt_token_is_not_an_operator() {
        let mut buffer = typed(&["2", "*"]);
        assert!(buffer.append(SQRT_TOKEN));
        assert_eq!(buffer.as_str(), "2*sqrt(");
    }

    #[test]
    fn test_backspace() {
        let mut buffer = typed(&["1", "2"]);
        assert!(buffer.backspace());
        assert_eq!(buffer.as_str(), "1");
        assert!(buffer.backspace());
        assert!(!buffer.backspace());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace_removes_one_char_of_multichar_token() {
        let mut buffer = typed(&[SQRT_TOKEN]);
        buffer.backspace();
        assert_eq!(buffer.as_str(), "sqrt");
    }

    #[test]
    fn test_display_defaults_to_zero() {
        let mut buffer = typed(&["4", "2"]);
        assert_eq!(buffer.display(), "42");
        buffer.clear();
        assert_eq!(buffer.display(), "0");
    }

    #[test]
    fn test_empty_token_ignored() {
        let mut buffer = InputBuffer::new();
        assert!(!buffer.append(""));
        assert!(buffer.is_empty());
    }
}
