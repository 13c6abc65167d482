//! Datasource variants describing how raw readings are acquired
//!
//! The variant is chosen by the datapoint's `datasourcetype` before any column
//! is looked at, and each variant decodes its own columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::columns::{self, ColumnDecode, Columns};

mod mqtt;
mod ttnv3;
mod web;

pub mod timestamp;

pub use mqtt::{MqttDatasource, MqttProtocol};
pub use timestamp::{TimestampError, TimestampType};
pub use ttnv3::Ttnv3Datasource;
pub use web::{AuthenticationType, WebDatasource};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown datasource type '{0}'")]
pub struct UnknownSourceType(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Web documents
    Web,
    /// The Things Network v3
    Ttnv3,
    /// MQTT client
    Mqtt,
}

const SOURCE_TYPES: &[(&str, SourceType)] = &[
    ("web", SourceType::Web),
    ("ttnv3", SourceType::Ttnv3),
    ("mqtt", SourceType::Mqtt),
];

impl SourceType {
    pub fn lookup(text: &str) -> Option<Self> {
        columns::lookup(SOURCE_TYPES, text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Web => "web",
            SourceType::Ttnv3 => "ttnv3",
            SourceType::Mqtt => "mqtt",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = UnknownSourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| UnknownSourceType(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginDocumentFormat {
    #[default]
    #[serde(rename = "json", alias = "jsondoc")]
    Json,
    #[serde(rename = "xml", alias = "xmldoc")]
    Xml,
}

pub(crate) const DOCUMENT_FORMATS: &[(&str, OriginDocumentFormat)] = &[
    ("jsondoc", OriginDocumentFormat::Json),
    ("xmldoc", OriginDocumentFormat::Xml),
];

/// Exactly one of the acquisition methods of a datapoint
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datasource {
    Web(WebDatasource),
    Ttnv3(Ttnv3Datasource),
    Mqtt(MqttDatasource),
}

impl Datasource {
    /// A variant of the given type with every field at its zero value
    pub fn empty(source_type: SourceType) -> Self {
        match source_type {
            SourceType::Web => Datasource::Web(WebDatasource::default()),
            SourceType::Ttnv3 => Datasource::Ttnv3(Ttnv3Datasource::default()),
            SourceType::Mqtt => Datasource::Mqtt(MqttDatasource::default()),
        }
    }

    /// Decode storage columns into the variant selected by `source_type`.
    ///
    /// Never fails: unknown columns are skipped and malformed values leave
    /// the field at its zero value.
    pub fn decode(source_type: SourceType, columns: &Columns) -> Self {
        let mut datasource = Self::empty(source_type);
        for (name, data) in columns {
            let known = match &mut datasource {
                Datasource::Web(ds) => ds.decode_column(name, data),
                Datasource::Ttnv3(ds) => ds.decode_column(name, data),
                Datasource::Mqtt(ds) => ds.decode_column(name, data),
            };
            if !known {
                log::debug!("Column '{}' is not part of a {} datasource", name, source_type);
            }
        }
        datasource
    }

    /// Decode the `datasource` object of the JSON configuration format.
    ///
    /// Total like [`Datasource::decode`]: bad fields keep their zero value and
    /// anything other than an object yields the zero-valued variant.
    pub fn from_json(source_type: SourceType, value: serde_json::Value) -> Self {
        if !value.is_object() {
            if !value.is_null() {
                log::warn!("Ignoring {} datasource that is not an object", source_type);
            }
            return Self::empty(source_type);
        }
        let decoded = match source_type {
            SourceType::Web => serde_json::from_value(value).map(Datasource::Web),
            SourceType::Ttnv3 => serde_json::from_value(value).map(Datasource::Ttnv3),
            SourceType::Mqtt => serde_json::from_value(value).map(Datasource::Mqtt),
        };
        decoded.unwrap_or_else(|e| {
            log::warn!("Could not decode {} datasource: {}", source_type, e);
            Self::empty(source_type)
        })
    }

    pub fn source_type(&self) -> SourceType {
        match self {
            Datasource::Web(_) => SourceType::Web,
            Datasource::Ttnv3(_) => SourceType::Ttnv3,
            Datasource::Mqtt(_) => SourceType::Mqtt,
        }
    }

    /// How reading timestamps are derived; LoRaWAN uplinks are stamped on arrival
    pub fn timestamp_type(&self) -> TimestampType {
        match self {
            Datasource::Web(ds) => ds.timestamp_type,
            Datasource::Ttnv3(_) => TimestampType::PollTime,
            Datasource::Mqtt(ds) => ds.timestamp_type,
        }
    }
}
