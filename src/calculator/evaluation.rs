//! Expression evaluation.
//!
//! Wraps the arithmetic parser with the calculator's rules: a dangling
//! operator is an error, non-finite values are errors, and successful
//! values are formatted for display.

use super::detection::ends_with_binary_operator;
use super::format::{MAX_FRACTION_DIGITS, format_number_with};
use super::parser::{ParseError, parse_and_eval};
use thiserror::Error;

/// Text shown in place of a result when evaluation fails.
pub const ERROR_SENTINEL: &str = "Error";

/// Why an expression produced the error sentinel.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("expression ends with an operator")]
    TrailingOperator,

    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("result is not a finite number ({0})")]
    NotFinite(f64),
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The expression exactly as entered.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display (with thousand separators).
        display_result: String,
    },
    /// The expression could not be turned into a finite number.
    Error {
        /// The expression exactly as entered.
        expression: String,
        reason: EvalError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string: the formatted result or [`ERROR_SENTINEL`].
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { .. } => ERROR_SENTINEL,
        }
    }

    /// The numeric value, only for successful results.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }

    /// The failure reason, only for errors.
    pub fn error(&self) -> Option<&EvalError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { reason, .. } => Some(reason),
        }
    }
}

/// Evaluate an expression with the default display precision.
pub fn evaluate_expression(input: &str) -> CalcResult {
    evaluate_with_precision(input, MAX_FRACTION_DIGITS)
}

/// Evaluate an expression, keeping at most `max_fraction_digits` in the display.
pub fn evaluate_with_precision(input: &str, max_fraction_digits: usize) -> CalcResult {
    let expression = input.to_string();

    match compute(input) {
        Ok(value) => CalcResult::Success {
            expression,
            display_result: format_number_with(value, max_fraction_digits),
            value,
        },
        Err(reason) => {
            tracing::debug!(%expression, %reason, "Evaluation failed");
            CalcResult::Error { expression, reason }
        }
    }
}

fn compute(input: &str) -> Result<f64, EvalError> {
    if input.trim().is_empty() {
        return Err(EvalError::Empty);
    }
    if ends_with_binary_operator(input) {
        return Err(EvalError::TrailingOperator);
    }

    let value = parse_and_eval(input)?;
    if !value.is_finite() {
        return Err(EvalError::NotFinite(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_evaluation() {
        let result = evaluate_expression("2+2");
        assert!(result.is_success());
        assert_eq!(result.display(), "4");
        assert_eq!(result.expression(), "2+2");
        assert_eq!(result.value(), Some(4.0));
    }

    #[test]
    fn test_thousand_separators() {
        let result = evaluate_expression("1000*1000");
        assert_eq!(result.display(), "1,000,000");
    }

    #[test]
    fn test_caret_and_percent() {
        assert_eq!(evaluate_expression("2^3").display(), "8");
        assert_eq!(evaluate_expression("50%").display(), "0.5");
    }

    #[test]
    fn test_division_by_zero() {
        let result = evaluate_expression("5/0");
        assert!(!result.is_success());
        assert_eq!(result.display(), ERROR_SENTINEL);
        assert!(matches!(result.error(), Some(EvalError::NotFinite(v)) if v.is_infinite()));
    }

    #[test]
    fn test_not_a_number() {
        let result = evaluate_expression("sqrt(0-4)");
        assert!(matches!(result.error(), Some(EvalError::NotFinite(v)) if v.is_nan()));
    }

    #[test]
    fn test_trailing_operator() {
        let result = evaluate_expression("3+");
        assert_eq!(result.display(), "Error");
        assert_eq!(result.error(), Some(&EvalError::TrailingOperator));
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(evaluate_expression("").error(), Some(&EvalError::Empty));
    }

    #[test]
    fn test_invalid_expression() {
        let result = evaluate_expression("2*(3");
        assert!(matches!(result.error(), Some(EvalError::Syntax(_))));
        assert_eq!(result.display(), "Error");
    }

    #[test]
    fn test_deeply_nested_input_is_error() {
        let input = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let result = evaluate_expression(&input);
        assert_eq!(result.display(), ERROR_SENTINEL);
        assert!(matches!(
            result.error(),
            Some(EvalError::Syntax(ParseError::TooDeep { .. }))
        ));
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(evaluate_expression("1/2048").display(), "0.0004882813");
        assert_eq!(evaluate_expression("10/4096").display(), "0.0024414063");
    }

    #[test]
    fn test_precision() {
        assert_eq!(evaluate_with_precision("1/3", 4).display(), "0.3333");
    }
}
