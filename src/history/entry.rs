//! A single recorded calculation.

use crate::calculator::CalcResult;
use serde::{Deserialize, Serialize};

/// One past calculation: the expression as typed and its displayed result.
///
/// Serialized as `{"expression": ..., "result": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression entered by the user, before any rewriting.
    pub expression: String,
    /// The formatted result (with thousand separators).
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Create an entry from a successful evaluation.
    ///
    /// Returns `None` for errors; failed calculations are never recorded.
    pub fn from_calc_result(result: &CalcResult) -> Option<Self> {
        match result {
            CalcResult::Success {
                expression,
                display_result,
                ..
            } => Some(Self::new(expression.clone(), display_result.clone())),
            CalcResult::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::evaluate_expression;

    #[test]
    fn test_from_success() {
        let entry = HistoryEntry::from_calc_result(&evaluate_expression("1500*2")).unwrap();
        assert_eq!(entry, HistoryEntry::new("1500*2", "3,000"));
    }

    #[test]
    fn test_errors_are_not_recorded() {
        assert!(HistoryEntry::from_calc_result(&evaluate_expression("5/0")).is_none());
    }

    #[test]
    fn test_json_layout() {
        let json = serde_json::to_string(&HistoryEntry::new("2+2", "4")).unwrap();
        assert_eq!(json, r#"{"expression":"2+2","result":"4"}"#);
    }
}
