//! Seam for the `condition` and `scalefunc` expressions of a datapoint.
//!
//! The expressions are opaque to this crate; whoever runs the pipeline
//! supplies an evaluator.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot evaluate expression '{expression}': {reason}")]
pub struct ExpressionError {
    pub expression: String,
    pub reason: String,
}

impl ExpressionError {
    pub fn new(expression: &str, reason: impl Into<String>) -> Self {
        Self {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

pub trait ExpressionEvaluator {
    /// Decide whether a raw reading should be kept
    fn condition(&self, expression: &str, raw: f64) -> Result<bool, ExpressionError>;

    /// Post-process an already scaled value
    fn scale(&self, expression: &str, value: f64) -> Result<f64, ExpressionError>;
}

/// Evaluator for deployments without an expression engine.
///
/// Any non-blank expression is reported as an error instead of being skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExpressions;

impl ExpressionEvaluator for NoExpressions {
    fn condition(&self, expression: &str, _raw: f64) -> Result<bool, ExpressionError> {
        Err(ExpressionError::new(expression, "no expression evaluator configured"))
    }

    fn scale(&self, expression: &str, _value: f64) -> Result<f64, ExpressionError> {
        Err(ExpressionError::new(expression, "no expression evaluator configured"))
    }
}

/// Blank expressions mean "not configured"
pub(crate) fn is_set(expression: &str) -> bool {
    !expression.trim().is_empty()
}
