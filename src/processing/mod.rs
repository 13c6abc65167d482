//! Value processing for a single datapoint
//!
//! A raw reading is filtered by the datapoint's condition, scaled, optionally
//! post-processed and finally checked against the configured bounds.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::columns::{self, ColumnDecode, FieldSetter};
use crate::datapoint::Violation;
use crate::lenient;

pub mod batch;
pub mod expression;
pub mod jsonata;
pub mod scaling;

pub use expression::{ExpressionError, ExpressionEvaluator, NoExpressions};
pub use jsonata::JsonataEvaluator;
pub use scaling::{ScalingError, ScalingLaw};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Limit {
    Lower,
    Upper,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Lower => f.write_str("lower"),
            Limit::Upper => f.write_str("upper"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error(transparent)]
    Scaling(#[from] ScalingError),
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    #[error("value {value} is out of range; {limit} bound is {bound}")]
    OutOfRange { value: f64, bound: f64, limit: Limit },
}

/// Result of a successful transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transformed {
    Value(f64),
    /// The condition rejected the reading; nothing should be published
    Filtered,
}

impl Transformed {
    pub fn value(self) -> Option<f64> {
        match self {
            Transformed::Value(v) => Some(v),
            Transformed::Filtered => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Processing {
    #[serde(deserialize_with = "lenient::or_default")]
    pub unit: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub scaling: ScalingLaw,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub k: f64,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub m: f64,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub min: f64,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub max: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub condition: String,
    #[serde(rename = "scalefunc", deserialize_with = "lenient::or_default")]
    pub scale_func: String,
}

impl ColumnDecode for Processing {
    const FIELDS: &'static [(&'static str, FieldSetter<Self>)] = &[
        ("unit", |p, d| p.unit = columns::text(d)),
        ("scaling", |p, d| {
            columns::lookup_or_retain(&mut p.scaling, d, scaling::SCALING_NAMES)
        }),
        ("k", |p, d| columns::parse_or_retain(&mut p.k, d)),
        ("m", |p, d| columns::parse_or_retain(&mut p.m, d)),
        ("min", |p, d| columns::parse_or_retain(&mut p.min, d)),
        ("max", |p, d| columns::parse_or_retain(&mut p.max, d)),
        ("condition", |p, d| p.condition = columns::text(d)),
        ("scalefunc", |p, d| p.scale_func = columns::text(d)),
    ];
}

impl Processing {
    /// Configured bounds; `min == max == 0` means none were set
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.min == 0.0 && self.max == 0.0 {
            None
        } else {
            Some((self.min, self.max))
        }
    }

    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (name, value) in [("k", self.k), ("m", self.m), ("min", self.min), ("max", self.max)] {
            if !value.is_finite() {
                violations.push(Violation::NonFiniteParameter { name, value });
            }
        }
        if self.min > self.max {
            violations.push(Violation::InvertedBounds {
                min: self.min,
                max: self.max,
            });
        }
        violations
    }

    /// Transform without an expression engine; see [`NoExpressions`]
    pub fn transform(&self, raw: f64) -> Result<Transformed, ProcessingError> {
        self.transform_with(raw, &NoExpressions)
    }

    pub fn transform_with<E>(
        &self,
        raw: f64,
        evaluator: &E,
    ) -> Result<Transformed, ProcessingError>
    where
        E: ExpressionEvaluator + ?Sized,
    {
        if expression::is_set(&self.condition) && !evaluator.condition(&self.condition, raw)? {
            log::trace!("Reading {} filtered by condition '{}'", raw, self.condition);
            return Ok(Transformed::Filtered);
        }

        let mut value = self.scaling.apply(raw, self.k, self.m)?;

        if expression::is_set(&self.scale_func) {
            value = evaluator.scale(&self.scale_func, value)?;
            // NaN would slip through the bounds check below
            if !value.is_finite() {
                return Err(ExpressionError::new(
                    &self.scale_func,
                    format!("result {} is not a finite number", value),
                )
                .into());
            }
        }

        if let Some((min, max)) = self.bounds() {
            if value < min {
                return Err(ProcessingError::OutOfRange {
                    value,
                    bound: min,
                    limit: Limit::Lower,
                });
            }
            if value > max {
                return Err(ProcessingError::OutOfRange {
                    value,
                    bound: max,
                    limit: Limit::Upper,
                });
            }
        }

        Ok(Transformed::Value(value))
    }
}
