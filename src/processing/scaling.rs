//! Scaling laws mapping a raw reading to an engineering-unit value
//!
//! Every law is followed by the affine stage `k * x + m`. For the unit
//! conversions (angles, temperatures) the physical conversion runs first and
//! the affine stage is applied to its result.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::columns;

const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    #[error("{law} is undefined for input {raw}")]
    Domain { law: ScalingLaw, raw: f64 },
    #[error("unsupported scaling law '{0}'")]
    UnsupportedScalingLaw(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalingLaw {
    #[default]
    #[serde(rename = "lin")]
    Lin,
    #[serde(rename = "ln", alias = "log")]
    Ln,
    #[serde(rename = "exp")]
    Exp,
    #[serde(rename = "rad")]
    Rad,
    #[serde(rename = "deg")]
    Deg,
    #[serde(rename = "fToC")]
    FahrenheitToCelsius,
    #[serde(rename = "cToF")]
    CelsiusToFahrenheit,
    #[serde(rename = "kToC")]
    KelvinToCelsius,
    #[serde(rename = "cToK")]
    CelsiusToKelvin,
    #[serde(rename = "kToF", alias = "ktoF")]
    KelvinToFahrenheit,
    #[serde(rename = "fToK")]
    FahrenheitToKelvin,
}

/// Textual names as stored in columns, aliases last
pub(crate) const SCALING_NAMES: &[(&str, ScalingLaw)] = &[
    ("lin", ScalingLaw::Lin),
    ("ln", ScalingLaw::Ln),
    ("exp", ScalingLaw::Exp),
    ("rad", ScalingLaw::Rad),
    ("deg", ScalingLaw::Deg),
    ("fToC", ScalingLaw::FahrenheitToCelsius),
    ("cToF", ScalingLaw::CelsiusToFahrenheit),
    ("kToC", ScalingLaw::KelvinToCelsius),
    ("cToK", ScalingLaw::CelsiusToKelvin),
    ("kToF", ScalingLaw::KelvinToFahrenheit),
    ("fToK", ScalingLaw::FahrenheitToKelvin),
    ("log", ScalingLaw::Ln),
    ("ktoF", ScalingLaw::KelvinToFahrenheit),
];

impl ScalingLaw {
    /// Best-effort lookup; `None` for unknown text
    pub fn lookup(text: &str) -> Option<Self> {
        columns::lookup(SCALING_NAMES, text)
    }

    pub fn as_str(&self) -> &'static str {
        SCALING_NAMES
            .iter()
            .find(|(_, law)| law == self)
            .map(|(name, _)| *name)
            .unwrap_or("lin")
    }

    pub fn apply(self, raw: f64, k: f64, m: f64) -> Result<f64, ScalingError> {
        apply(self, raw, k, m)
    }

    /// The unit conversion part of the law, before the affine stage
    fn convert(self, raw: f64) -> Result<f64, ScalingError> {
        let converted = match self {
            ScalingLaw::Lin => raw,
            ScalingLaw::Ln => {
                if raw.is_nan() || raw <= 0.0 {
                    return Err(ScalingError::Domain { law: self, raw });
                }
                raw.ln()
            }
            ScalingLaw::Exp => raw.exp(),
            ScalingLaw::Rad => raw * PI / 180.0,
            ScalingLaw::Deg => raw * 180.0 / PI,
            ScalingLaw::FahrenheitToCelsius => (raw - 32.0) * 5.0 / 9.0,
            ScalingLaw::CelsiusToFahrenheit => raw * 9.0 / 5.0 + 32.0,
            ScalingLaw::KelvinToCelsius => raw + ABSOLUTE_ZERO_CELSIUS,
            ScalingLaw::CelsiusToKelvin => raw - ABSOLUTE_ZERO_CELSIUS,
            ScalingLaw::KelvinToFahrenheit => (raw + ABSOLUTE_ZERO_CELSIUS) * 9.0 / 5.0 + 32.0,
            ScalingLaw::FahrenheitToKelvin => (raw - 32.0) * 5.0 / 9.0 - ABSOLUTE_ZERO_CELSIUS,
        };
        Ok(converted)
    }
}

impl fmt::Display for ScalingLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalingLaw {
    type Err = ScalingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| ScalingError::UnsupportedScalingLaw(s.to_string()))
    }
}

/// Apply `law` to `raw`, followed by `k * x + m`.
///
/// `k == 0` yields `m` even where the conversion itself overflows. Any other
/// non-finite result is a domain error.
pub fn apply(law: ScalingLaw, raw: f64, k: f64, m: f64) -> Result<f64, ScalingError> {
    let converted = law.convert(raw)?;
    let scaled = if k == 0.0 { m } else { k * converted + m };
    if !scaled.is_finite() {
        return Err(ScalingError::Domain { law, raw });
    }
    Ok(scaled)
}

/// Apply a law given by name; unknown names fail rather than fall back
pub fn apply_named(name: &str, raw: f64, k: f64, m: f64) -> Result<f64, ScalingError> {
    apply(name.parse()?, raw, k, m)
}
