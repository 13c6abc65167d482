use dpc::columns::{from_pairs, Columns};
use dpc::datapoint::{
    DatapointDescriptor, DatapointError, DatapointRecord, PollInterval, RawReading, TimeToLive,
    Violation,
};
use dpc::datasource::{Datasource, MqttProtocol, OriginDocumentFormat, SourceType, TimestampType};
use dpc::processing::{Limit, NoExpressions, ProcessingError, ScalingLaw, Transformed};

mod stubs;

fn pairs(pairs: &[(&'static str, &'static str)]) -> Columns {
    from_pairs(pairs.iter().copied())
}

fn record(
    columns: &[(&'static str, &'static str)],
    proc: &[(&'static str, &'static str)],
    datasource: &[(&'static str, &'static str)],
) -> DatapointRecord {
    DatapointRecord {
        columns: pairs(columns),
        proc: pairs(proc),
        datasource: pairs(datasource),
    }
}

#[test]
fn test_parse_example_datapoints() {
    let boiler = DatapointDescriptor::from_json(stubs::datapoints::BOILER_TEMP).unwrap();
    assert_eq!(boiler.id().to_string(), "plant/boiler/temp");
    assert_eq!(boiler.interval(), PollInterval::FiveMinutes);
    assert_eq!(boiler.time_to_live(), TimeToLive::B);
    assert_eq!(boiler.unit(), "°C");
    assert_eq!(boiler.source_type(), SourceType::Mqtt);

    let humidity = DatapointDescriptor::from_json(stubs::datapoints::WEATHER_HUMIDITY).unwrap();
    assert_eq!(humidity.interval(), PollInterval::OneMinute);
    assert_eq!(humidity.datasource().timestamp_type(), TimestampType::EpochSeconds);

    let soil = DatapointDescriptor::from_json(stubs::datapoints::FIELD_SOIL).unwrap();
    assert_eq!(soil.processing().scaling, ScalingLaw::KelvinToFahrenheit);
    assert_eq!(soil.processing().transform(273.15).unwrap(), Transformed::Value(32.0));
}

#[test]
fn test_linear_transform_in_range() {
    let boiler = DatapointDescriptor::from_json(stubs::datapoints::BOILER_TEMP).unwrap();
    assert_eq!(
        boiler.processing().transform(10.0).unwrap(),
        Transformed::Value(21.0)
    );
}

#[test]
fn test_linear_transform_out_of_range() {
    let boiler = DatapointDescriptor::from_json(stubs::datapoints::BOILER_TEMP).unwrap();
    match boiler.processing().transform(60.0) {
        Err(ProcessingError::OutOfRange {
            value,
            bound,
            limit,
        }) => {
            assert_eq!(value, 121.0);
            assert_eq!(bound, 100.0);
            assert_eq!(limit, Limit::Upper);
        }
        other => panic!("expected OutOfRange, got {:?}", other),
    }
}

#[test]
fn test_record_with_mqtt_datasource() {
    let rec = record(
        &[
            ("project", "plant"),
            ("subsystem", "boiler"),
            ("name", "pressure"),
            ("pollinterval", "one_hour"),
            ("datasourcetype", "mqtt"),
        ],
        &[("k", "1"), ("unit", "bar")],
        &[
            ("protocol", "mqtts"),
            ("address", "broker.example"),
            ("port", "8883"),
            ("topic", "sensors/1"),
        ],
    );
    let dp = DatapointDescriptor::from_record(&rec).unwrap();
    assert_eq!(dp.interval(), PollInterval::OneHour);
    assert_eq!(dp.unit(), "bar");

    let Datasource::Mqtt(ds) = dp.datasource() else {
        panic!("expected MQTT datasource");
    };
    assert_eq!(ds.protocol, Some(MqttProtocol::Mqtts));
    assert_eq!(ds.address, "broker.example");
    assert_eq!(ds.port, 8883);
    assert_eq!(ds.topic, "sensors/1");
    assert_eq!(ds.username, "");
    assert_eq!(ds.format, OriginDocumentFormat::Json);
}

#[test]
fn test_record_with_bogus_protocol_still_decodes() {
    let rec = record(
        &[
            ("project", "plant"),
            ("subsystem", "boiler"),
            ("name", "pressure"),
            ("datasourcetype", "mqtt"),
        ],
        &[],
        &[
            ("protocol", "bogus"),
            ("address", "broker.example"),
            ("port", "8883"),
            ("topic", "sensors/1"),
        ],
    );
    let dp = DatapointDescriptor::from_record(&rec).unwrap();
    let Datasource::Mqtt(ds) = dp.datasource() else {
        panic!("expected MQTT datasource");
    };
    assert_eq!(ds.protocol, None);
    assert_eq!(ds.address, "broker.example");
    assert_eq!(ds.port, 8883);
    assert_eq!(ds.topic, "sensors/1");
}

#[test]
fn test_record_violations_are_collected() {
    let rec = record(
        &[("subsystem", "boiler"), ("name", "Temp")],
        &[("min", "10"), ("max", "5")],
        &[],
    );
    let err = DatapointDescriptor::from_record(&rec).unwrap_err();
    assert!(err.violations.contains(&Violation::MissingSourceType));
    assert!(err.violations.contains(&Violation::EmptyProject));
    assert!(err.violations.contains(&Violation::InvalidName("Temp".to_string())));
    assert!(err
        .violations
        .contains(&Violation::InvertedBounds { min: 10.0, max: 5.0 }));
}

#[test]
fn test_invalid_json_datapoints() {
    let err = DatapointDescriptor::from_json(stubs::datapoints::BROKEN).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("project must not be empty"), "{message}");
    assert!(message.contains("name '1temp'"), "{message}");
    assert!(message.contains("proc.min (10) is greater than proc.max (5)"), "{message}");

    match DatapointDescriptor::from_json(stubs::datapoints::UNKNOWN_SOURCE) {
        Err(DatapointError::Validation(e)) => assert_eq!(
            e.violations,
            vec![Violation::UnknownSourceType("kafka".to_string())]
        ),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_json_with_unknown_scaling_still_loads() {
    let json = stubs::datapoints::BOILER_TEMP
        .replace(r#""scaling": "lin""#, r#""scaling": "cubic""#);
    let boiler = DatapointDescriptor::from_json(&json).unwrap();
    assert_eq!(boiler.processing().scaling, ScalingLaw::Lin);
    assert_eq!(boiler.processing().k, 2.0);
}

#[test]
fn test_json_round_trip_preserves_descriptor() {
    let humidity = DatapointDescriptor::from_json(stubs::datapoints::WEATHER_HUMIDITY).unwrap();
    let json = serde_json::to_string(&humidity).unwrap();
    assert_eq!(DatapointDescriptor::from_json(&json).unwrap(), humidity);
}

#[test]
fn test_process_reading_with_source_timestamp() {
    let humidity = DatapointDescriptor::from_json(stubs::datapoints::WEATHER_HUMIDITY).unwrap();
    let reading = RawReading {
        value: 55.5,
        timestamp: Some("1700000000".to_string()),
        poll_time: 1_700_000_030_000,
    };
    let processed = humidity.process(&reading, &NoExpressions).unwrap().unwrap();
    assert_eq!(processed.value, 55.5);
    assert_eq!(processed.t, 1_700_000_000_000);
    assert_eq!(processed.unit, "%");
    assert_eq!(processed.name, "humidity");
}
