//! Operator classification for calculator input.
//!
//! Decides which characters count as operators when building and
//! validating an expression.

use lazy_static::lazy_static;
use regex::Regex;

/// Characters treated as operators by the input builder.
pub const OPERATORS: &[char] = &['+', '-', '*', '/', '%', '^'];

lazy_static! {
    /// Splits an expression into its numeric segments.
    static ref OPERATOR_SPLIT: Regex = Regex::new(r"[-+*/^%]").unwrap();
}

/// Check if a character is one of the calculator operators.
pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Check if the expression's last character is an operator.
pub fn ends_with_operator(input: &str) -> bool {
    input.chars().last().is_some_and(is_operator)
}

/// Check if the expression ends in an operator that still needs a right operand.
///
/// A trailing `%` is a complete postfix percent, so `50%` is not considered
/// dangling while `50+` is.
pub fn ends_with_binary_operator(input: &str) -> bool {
    input
        .trim_end()
        .chars()
        .last()
        .is_some_and(|c| c != '%' && is_operator(c))
}

/// The numeric segment after the last operator.
///
/// For `12+3.4` this is `3.4`; for an input without operators it is the
/// whole input.
pub fn trailing_number(input: &str) -> &str {
    OPERATOR_SPLIT.split(input).last().unwrap_or(input)
}
