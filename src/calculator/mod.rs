//! Calculator core: building, evaluating and formatting expressions.
//!
//! This module provides functionality to:
//! - Validate tokens as they are appended to the input
//! - Parse and evaluate arithmetic expressions
//! - Format results for display

mod detection;
mod evaluation;
mod format;
mod input;
mod parser;

pub use detection::{OPERATORS, ends_with_operator, is_operator, trailing_number};
pub use evaluation::{
    CalcResult, ERROR_SENTINEL, EvalError, evaluate_expression, evaluate_with_precision,
};
pub use format::{MAX_FRACTION_DIGITS, format_number, format_number_with};
pub use input::{InputBuffer, SQRT_TOKEN};
pub use parser::{ParseError, parse_and_eval};
