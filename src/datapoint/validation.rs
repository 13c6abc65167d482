use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::datasource::{Datasource, SourceType};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][A-Za-z0-9_.]*$").expect("datapoint name pattern is valid")
});

pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// A single broken invariant of a datapoint configuration
#[derive(Clone, Debug, PartialEq)]
pub enum Violation {
    EmptyProject,
    EmptySubsystem,
    InvalidName(String),
    MissingSourceType,
    UnknownSourceType(String),
    SourceTypeMismatch {
        declared: SourceType,
        actual: SourceType,
    },
    NonFiniteParameter {
        name: &'static str,
        value: f64,
    },
    InvertedBounds {
        min: f64,
        max: f64,
    },
    InvalidUrl {
        url: String,
        reason: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyProject => write!(f, "project must not be empty"),
            Violation::EmptySubsystem => write!(f, "subsystem must not be empty"),
            Violation::InvalidName(name) => write!(
                f,
                "name '{}' must match {}",
                name,
                NAME_PATTERN.as_str()
            ),
            Violation::MissingSourceType => write!(f, "datasourcetype is missing"),
            Violation::UnknownSourceType(text) => write!(f, "unknown datasourcetype '{}'", text),
            Violation::SourceTypeMismatch { declared, actual } => write!(
                f,
                "datasourcetype is '{}' but the datasource is a {} datasource",
                declared, actual
            ),
            Violation::NonFiniteParameter { name, value } => {
                write!(f, "proc.{} must be a finite number, got {}", name, value)
            }
            Violation::InvertedBounds { min, max } => {
                write!(f, "proc.min ({}) is greater than proc.max ({})", min, max)
            }
            Violation::InvalidUrl { url, reason } => {
                write!(f, "datasource url '{}' is invalid: {}", url, reason)
            }
        }
    }
}

/// Every violation found while assembling a datapoint
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid datapoint configuration: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl ValidationError {
    /// `Ok(())` when nothing was violated
    pub fn check(violations: Vec<Violation>) -> Result<(), ValidationError> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// Web URLs must be absolute and must not embed credentials
pub(crate) fn validate_datasource(datasource: &Datasource) -> Vec<Violation> {
    let Datasource::Web(web) = datasource else {
        return Vec::new();
    };
    if web.url.is_empty() {
        return Vec::new();
    }
    let invalid = |reason: String| {
        vec![Violation::InvalidUrl {
            url: web.url.clone(),
            reason,
        }]
    };
    match url::Url::parse(&web.url) {
        Ok(parsed) if !parsed.username().is_empty() || parsed.password().is_some() => {
            invalid("credentials belong in the auth field".to_string())
        }
        Ok(_) => Vec::new(),
        Err(e) => invalid(e.to_string()),
    }
}
