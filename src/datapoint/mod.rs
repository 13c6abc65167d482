//! Datapoint configuration: identity, polling, retention, processing and datasource
//!
//! A [`DatapointDescriptor`] is only ever built through validation, either by
//! [`DatapointDescriptor::assemble`], from a storage record, or from the JSON
//! configuration format. It is not modified afterwards; changing a datapoint
//! means building a new descriptor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::columns::{self, ColumnDecode, Columns};
use crate::datasource::{Datasource, SourceType};
use crate::lenient;
use crate::processing::Processing;

mod identity;
mod interval;
mod reading;
mod validation;

pub use identity::DatapointId;
pub use interval::{PollInterval, TimeToLive};
pub use reading::{ProcessedReading, RawReading, ReadingError};
pub use validation::{is_valid_name, ValidationError, Violation};

#[derive(Error, Debug)]
pub enum DatapointError {
    #[error("could not parse datapoint JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatapointSettings", into = "DatapointSettings")]
pub struct DatapointDescriptor {
    id: DatapointId,
    interval: PollInterval,
    proc: Processing,
    time_to_live: TimeToLive,
    datasource: Datasource,
}

impl DatapointDescriptor {
    /// Build a descriptor, reporting every violated invariant at once
    pub fn assemble(
        id: DatapointId,
        interval: PollInterval,
        proc: Processing,
        time_to_live: TimeToLive,
        source_type: SourceType,
        datasource: Datasource,
    ) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        if id.project.is_empty() {
            violations.push(Violation::EmptyProject);
        }
        if id.subsystem.is_empty() {
            violations.push(Violation::EmptySubsystem);
        }
        if !is_valid_name(&id.name) {
            violations.push(Violation::InvalidName(id.name.clone()));
        }
        if datasource.source_type() != source_type {
            violations.push(Violation::SourceTypeMismatch {
                declared: source_type,
                actual: datasource.source_type(),
            });
        }
        violations.extend(proc.validate());
        violations.extend(validation::validate_datasource(&datasource));

        ValidationError::check(violations)?;

        Ok(Self {
            id,
            interval,
            proc,
            time_to_live,
            datasource,
        })
    }

    /// Build a descriptor from a storage record.
    ///
    /// Field-level problems degrade to zero values; only violations of the
    /// descriptor invariants (including a missing discriminator) fail.
    pub fn from_record(record: &DatapointRecord) -> Result<Self, ValidationError> {
        let column = |name: &str| record.columns.get(name).map(|data| columns::text(data));

        let id = DatapointId::new(
            column("project").unwrap_or_default(),
            column("subsystem").unwrap_or_default(),
            column("name").unwrap_or_default(),
        );

        let mut poll_interval = PollInterval::default();
        if let Some(data) = record.columns.get("pollinterval") {
            columns::lookup_or_retain(&mut poll_interval, data, interval::POLL_INTERVALS);
        }
        let mut time_to_live = TimeToLive::default();
        if let Some(data) = record.columns.get("timetolive") {
            columns::lookup_or_retain(&mut time_to_live, data, interval::TIME_TO_LIVE);
        }

        Self::assemble_resolved(
            id,
            poll_interval,
            Processing::from_columns(&record.proc),
            time_to_live,
            resolve_source_type(column("datasourcetype")),
            |source_type| Datasource::decode(source_type, &record.datasource),
        )
    }

    /// Parse the JSON configuration format. Fields that do not decode keep
    /// their defaults; the result is then validated like any other descriptor.
    pub fn from_json(json: &str) -> Result<Self, DatapointError> {
        let settings: DatapointSettings = serde_json::from_str(json)?;
        Ok(Self::try_from(settings)?)
    }

    /// [`Self::assemble`] for a discriminator that may not have resolved.
    /// Without one the remaining invariants are still checked and reported
    /// together with the discriminator problem.
    fn assemble_resolved(
        id: DatapointId,
        interval: PollInterval,
        proc: Processing,
        time_to_live: TimeToLive,
        source_type: Result<SourceType, Violation>,
        datasource: impl FnOnce(SourceType) -> Datasource,
    ) -> Result<Self, ValidationError> {
        let violation = match source_type {
            Ok(source_type) => {
                let datasource = datasource(source_type);
                return Self::assemble(id, interval, proc, time_to_live, source_type, datasource);
            }
            Err(violation) => violation,
        };

        let mut violations = vec![violation];
        if let Err(e) = Self::assemble(
            id,
            interval,
            proc,
            time_to_live,
            SourceType::Web,
            Datasource::empty(SourceType::Web),
        ) {
            violations.extend(e.violations);
        }
        Err(ValidationError { violations })
    }

    /// A copy of this datapoint with different processing settings
    pub fn with_processing(&self, proc: Processing) -> Result<Self, ValidationError> {
        Self::assemble(
            self.id.clone(),
            self.interval,
            proc,
            self.time_to_live,
            self.source_type(),
            self.datasource.clone(),
        )
    }

    pub fn id(&self) -> &DatapointId {
        &self.id
    }

    pub fn project(&self) -> &str {
        &self.id.project
    }

    pub fn subsystem(&self) -> &str {
        &self.id.subsystem
    }

    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn interval(&self) -> PollInterval {
        self.interval
    }

    pub fn processing(&self) -> &Processing {
        &self.proc
    }

    pub fn unit(&self) -> &str {
        &self.proc.unit
    }

    pub fn time_to_live(&self) -> TimeToLive {
        self.time_to_live
    }

    pub fn source_type(&self) -> SourceType {
        self.datasource.source_type()
    }

    pub fn datasource(&self) -> &Datasource {
        &self.datasource
    }
}

/// Blank counts as missing
fn resolve_source_type(text: Option<String>) -> Result<SourceType, Violation> {
    match text.filter(|text| !text.trim().is_empty()) {
        Some(text) => SourceType::lookup(&text).ok_or(Violation::UnknownSourceType(text)),
        None => Err(Violation::MissingSourceType),
    }
}

/// Raw data for one datapoint as read from storage
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatapointRecord {
    /// Scalar columns: project, subsystem, name, pollinterval, timetolive, datasourcetype
    pub columns: Columns,
    pub proc: Columns,
    pub datasource: Columns,
}

/// The JSON configuration format, before validation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatapointSettings {
    #[serde(deserialize_with = "lenient::or_default")]
    project: String,
    #[serde(deserialize_with = "lenient::or_default")]
    subsystem: String,
    #[serde(deserialize_with = "lenient::or_default")]
    name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pollinterval: PollInterval,
    #[serde(deserialize_with = "lenient::or_default")]
    proc: Processing,
    #[serde(rename = "timeToLive", deserialize_with = "lenient::or_default")]
    time_to_live: TimeToLive,
    #[serde(deserialize_with = "lenient::or_default")]
    datasourcetype: Option<String>,
    datasource: serde_json::Value,
}

impl TryFrom<DatapointSettings> for DatapointDescriptor {
    type Error = ValidationError;

    fn try_from(settings: DatapointSettings) -> Result<Self, Self::Error> {
        let datasource = settings.datasource;
        Self::assemble_resolved(
            DatapointId::new(settings.project, settings.subsystem, settings.name),
            settings.pollinterval,
            settings.proc,
            settings.time_to_live,
            resolve_source_type(settings.datasourcetype),
            |source_type| Datasource::from_json(source_type, datasource),
        )
    }
}

impl From<DatapointDescriptor> for DatapointSettings {
    fn from(descriptor: DatapointDescriptor) -> Self {
        let datasourcetype = descriptor.source_type();
        Self {
            project: descriptor.id.project,
            subsystem: descriptor.id.subsystem,
            name: descriptor.id.name,
            pollinterval: descriptor.interval,
            proc: descriptor.proc,
            time_to_live: descriptor.time_to_live,
            datasourcetype: Some(datasourcetype.as_str().to_string()),
            datasource: serde_json::to_value(&descriptor.datasource)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::from_pairs;
    use crate::datasource::{MqttDatasource, MqttProtocol, Ttnv3Datasource};
    use crate::processing::ScalingLaw;
    use serde_json::json;

    fn ttn_id() -> DatapointId {
        DatapointId::new("farm", "field3", "moisture")
    }

    #[test]
    fn test_assemble_valid() {
        let dp = DatapointDescriptor::assemble(
            ttn_id(),
            PollInterval::TenMinutes,
            Processing::default(),
            TimeToLive::C,
            SourceType::Ttnv3,
            Datasource::Ttnv3(Ttnv3Datasource::default()),
        )
        .unwrap();
        assert_eq!(dp.id().to_string(), "farm/field3/moisture");
        assert_eq!(dp.source_type(), SourceType::Ttnv3);
        assert_eq!(dp.interval(), PollInterval::TenMinutes);
    }

    #[test]
    fn test_assemble_collects_all_violations() {
        let err = DatapointDescriptor::assemble(
            DatapointId::new("", "", "9lives"),
            PollInterval::default(),
            Processing {
                min: 5.0,
                max: 1.0,
                ..Default::default()
            },
            TimeToLive::default(),
            SourceType::Web,
            Datasource::Mqtt(MqttDatasource::default()),
        )
        .unwrap_err();
        assert_eq!(
            err.violations,
            vec![
                Violation::EmptyProject,
                Violation::EmptySubsystem,
                Violation::InvalidName("9lives".into()),
                Violation::SourceTypeMismatch {
                    declared: SourceType::Web,
                    actual: SourceType::Mqtt
                },
                Violation::InvertedBounds { min: 5.0, max: 1.0 },
            ]
        );
    }

    #[test]
    fn test_from_record() {
        let record = DatapointRecord {
            columns: from_pairs([
                ("project", "plant"),
                ("subsystem", "boiler"),
                ("name", "temp.out"),
                ("pollinterval", "five_minutes"),
                ("timetolive", "zz"),
                ("datasourcetype", "mqtt"),
            ]),
            proc: from_pairs([("scaling", "kToC"), ("k", "1"), ("m", "oops")]),
            datasource: from_pairs([
                ("protocol", "mqtts"),
                ("address", "broker.example"),
                ("port", "8883"),
                ("topic", "sensors/1"),
            ]),
        };
        let dp = DatapointDescriptor::from_record(&record).unwrap();
        assert_eq!(dp.interval(), PollInterval::FiveMinutes);
        assert_eq!(dp.time_to_live(), TimeToLive::A);
        assert_eq!(dp.processing().scaling, ScalingLaw::KelvinToCelsius);
        assert_eq!(dp.processing().m, 0.0);
        let Datasource::Mqtt(ds) = dp.datasource() else {
            panic!("expected MQTT datasource");
        };
        assert_eq!(ds.protocol, Some(MqttProtocol::Mqtts));
        assert_eq!(ds.port, 8883);
    }

    #[test]
    fn test_from_record_without_discriminator() {
        let record = DatapointRecord {
            columns: from_pairs([("project", "plant"), ("name", "Bad")]),
            ..Default::default()
        };
        let err = DatapointDescriptor::from_record(&record).unwrap_err();
        assert_eq!(
            err.violations,
            vec![
                Violation::MissingSourceType,
                Violation::EmptySubsystem,
                Violation::InvalidName("Bad".into()),
            ]
        );
    }

    #[test]
    fn test_json_roundtrip_uses_config_field_names() {
        let config = json!({
            "project": "plant",
            "subsystem": "boiler",
            "name": "pressure",
            "pollinterval": "one_hour",
            "proc": {"unit": "bar", "scaling": "lin", "k": 0.01, "m": 0, "min": 0, "max": 16},
            "timeToLive": "h",
            "datasourcetype": "web",
            "datasource": {
                "url": "https://plant.example/boiler.json",
                "authenticationType": "bearerToken",
                "auth": "token",
                "format": "json",
                "valueExpression": "$.pressure",
                "timestampType": "iso8601_offset",
                "timestampExpression": "$.ts"
            }
        });
        let dp: DatapointDescriptor = serde_json::from_value(config.clone()).unwrap();
        assert_eq!(dp.unit(), "bar");
        assert_eq!(dp.time_to_live(), TimeToLive::H);

        let written = serde_json::to_value(&dp).unwrap();
        assert_eq!(written["datasourcetype"], "web");
        assert_eq!(written["timeToLive"], "h");
        assert_eq!(written["datasource"], config["datasource"]);
        assert_eq!(written["proc"]["scalefunc"], "");
    }

    #[test]
    fn test_json_validation_failure() {
        let err = DatapointDescriptor::from_json(
            r#"{"project":"p","subsystem":"s","name":"Upper","datasourcetype":"ttnv3"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("name 'Upper' must match"));
        assert!(matches!(err, DatapointError::Validation(_)));
    }

    fn json_violations(json: &str) -> Vec<Violation> {
        match DatapointDescriptor::from_json(json) {
            Err(DatapointError::Validation(e)) => e.violations,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_json_discriminator_problems_are_reported_with_the_rest() {
        let unknown = r#"{"project":"","subsystem":"s","name":"Bad","datasourcetype":"kafka"}"#;
        assert_eq!(
            json_violations(unknown),
            vec![
                Violation::UnknownSourceType("kafka".into()),
                Violation::EmptyProject,
                Violation::InvalidName("Bad".into()),
            ]
        );
        assert_eq!(
            json_violations(r#"{"project":"","subsystem":"s","name":"Bad"}"#),
            vec![
                Violation::MissingSourceType,
                Violation::EmptyProject,
                Violation::InvalidName("Bad".into()),
            ]
        );
    }

    #[test]
    fn test_json_bad_fields_keep_defaults() {
        let dp = DatapointDescriptor::from_json(
            r#"{
                "project": "plant",
                "subsystem": "boiler",
                "name": "temp",
                "pollinterval": "every_tuesday",
                "timeToLive": 3,
                "proc": {"scaling": "cubic", "k": "abc", "m": 1},
                "datasourcetype": "mqtt",
                "datasource": {"protocol": "bogus", "address": "broker.example", "port": "x"}
            }"#,
        )
        .unwrap();
        assert_eq!(dp.interval(), PollInterval::OneMinute);
        assert_eq!(dp.time_to_live(), TimeToLive::A);
        assert_eq!(dp.processing().scaling, ScalingLaw::Lin);
        assert_eq!(dp.processing().k, 0.0);
        assert_eq!(dp.processing().m, 1.0);
        let Datasource::Mqtt(ds) = dp.datasource() else {
            panic!("expected MQTT datasource");
        };
        assert_eq!(ds.protocol, None);
        assert_eq!(ds.address, "broker.example");
        assert_eq!(ds.port, 1883);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            DatapointDescriptor::from_json("{\"project\": "),
            Err(DatapointError::ParseJson(_))
        ));
    }

    #[test]
    fn test_with_processing_builds_new_value() {
        let dp = DatapointDescriptor::assemble(
            ttn_id(),
            PollInterval::default(),
            Processing::default(),
            TimeToLive::default(),
            SourceType::Ttnv3,
            Datasource::empty(SourceType::Ttnv3),
        )
        .unwrap();
        let scaled = dp
            .with_processing(Processing {
                k: 2.0,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(dp.processing().k, 0.0);
        assert_eq!(scaled.processing().k, 2.0);
        assert_eq!(scaled.id(), dp.id());
    }
}
