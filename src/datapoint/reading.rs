use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DatapointDescriptor;
use crate::datasource::TimestampError;
use crate::processing::{ExpressionEvaluator, ProcessingError, Transformed};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadingError {
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

/// A value as acquired from the datasource
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub value: f64,
    /// Extracted by the datasource's timestamp expression, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// When the datasource was polled (epoch milliseconds)
    pub poll_time: i64,
}

/// A calibrated value ready for publishing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessedReading {
    pub project: String,
    pub subsystem: String,
    pub name: String,
    /// Epoch milliseconds
    pub t: i64,
    pub value: f64,
    pub unit: String,
}

impl ProcessedReading {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.t)
    }
}

impl DatapointDescriptor {
    /// Run one reading through processing and timestamp derivation.
    ///
    /// Returns `Ok(None)` when the datapoint's condition filtered the reading.
    pub fn process<E>(
        &self,
        reading: &RawReading,
        evaluator: &E,
    ) -> Result<Option<ProcessedReading>, ReadingError>
    where
        E: ExpressionEvaluator + ?Sized,
    {
        let value = match self.processing().transform_with(reading.value, evaluator)? {
            Transformed::Value(value) => value,
            Transformed::Filtered => return Ok(None),
        };

        let poll_time = DateTime::from_timestamp_millis(reading.poll_time)
            .ok_or(TimestampError::PollTime(reading.poll_time))?;
        let timestamp = self
            .datasource()
            .timestamp_type()
            .resolve(reading.timestamp.as_deref(), poll_time)?;

        Ok(Some(ProcessedReading {
            project: self.project().to_string(),
            subsystem: self.subsystem().to_string(),
            name: self.name().to_string(),
            t: timestamp.timestamp_millis(),
            value,
            unit: self.unit().to_string(),
        }))
    }
}
