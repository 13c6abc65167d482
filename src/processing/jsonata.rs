//! JSONata-backed expression evaluation
//!
//! The reading (or the scaled value) is the input document, so expressions
//! refer to it as `$`: `$ > 10` as a condition, `$ * 1000` as a scale function.

use bumpalo::Bump;
use jsonata_rs::JsonAta;

use super::expression::{ExpressionError, ExpressionEvaluator};

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonataEvaluator;

enum Outcome {
    Bool(bool),
    Number(f64),
    Undefined,
    Other,
}

fn evaluate(expression: &str, input: f64) -> Result<Outcome, ExpressionError> {
    if !input.is_finite() {
        return Err(ExpressionError::new(
            expression,
            format!("input {} is not a finite number", input),
        ));
    }

    let arena = Bump::new();
    let jsonata = JsonAta::new(expression, &arena)
        .map_err(|e| ExpressionError::new(expression, format!("parse failed: {}", e)))?;

    let input_str = serde_json::to_string(&input)
        .map_err(|e| ExpressionError::new(expression, format!("bad input: {}", e)))?;

    let result = jsonata
        .evaluate(Some(&input_str), None)
        .map_err(|e| ExpressionError::new(expression, format!("evaluation failed: {}", e)))?;

    let outcome = if result.is_bool() {
        Outcome::Bool(result.as_bool())
    } else if result.is_number() {
        Outcome::Number(result.as_f64())
    } else if result.is_undefined() {
        Outcome::Undefined
    } else {
        Outcome::Other
    };
    Ok(outcome)
}

impl ExpressionEvaluator for JsonataEvaluator {
    /// An undefined result (nothing matched) drops the reading
    fn condition(&self, expression: &str, raw: f64) -> Result<bool, ExpressionError> {
        match evaluate(expression, raw)? {
            Outcome::Bool(keep) => Ok(keep),
            Outcome::Undefined => Ok(false),
            Outcome::Number(_) | Outcome::Other => Err(ExpressionError::new(
                expression,
                "condition must evaluate to true or false",
            )),
        }
    }

    fn scale(&self, expression: &str, value: f64) -> Result<f64, ExpressionError> {
        match evaluate(expression, value)? {
            Outcome::Number(scaled) => Ok(scaled),
            _ => Err(ExpressionError::new(
                expression,
                "scale function must evaluate to a number",
            )),
        }
    }
}
