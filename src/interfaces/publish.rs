//! Messages handed to the publishing transport

use thiserror::Error;

use crate::constants::topics;
use crate::datapoint::{DatapointDescriptor, DatapointId, ProcessedReading};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    MqttClient(#[from] rumqttc::ClientError),
    #[error(transparent)]
    MqttConnection(#[from] rumqttc::ConnectionError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub topic: String,
    pub payload: String,
}

pub trait Publisher {
    fn publish(&mut self, messages: &[Message]) -> Result<(), PublishError>;
}

/// Datapoint configuration in its JSON form, addressed to the owning organisation
pub fn config_message(
    org_id: i64,
    descriptor: &DatapointDescriptor,
) -> Result<Message, PublishError> {
    Ok(Message {
        topic: topics::config(org_id, descriptor.id()),
        payload: serde_json::to_string(descriptor)?,
    })
}

pub fn reading_message(reading: &ProcessedReading) -> Result<Message, PublishError> {
    let id = DatapointId::new(
        reading.project.as_str(),
        reading.subsystem.as_str(),
        reading.name.as_str(),
    );
    Ok(Message {
        topic: topics::readings(&id),
        payload: serde_json::to_string(reading)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const CONFIG: &str = r#"{
        "project": "plant",
        "subsystem": "boiler",
        "name": "temp",
        "proc": {"unit": "C", "k": 1},
        "datasourcetype": "mqtt",
        "datasource": {"protocol": "tcp", "address": "10.0.0.2", "port": 1883, "topic": "boiler/temp"}
    }"#;

    #[test]
    fn test_config_message() {
        let descriptor = DatapointDescriptor::from_json(CONFIG).unwrap();
        let msg = config_message(42, &descriptor).unwrap();
        assert_eq!(msg.topic, "config/42/plant/boiler/temp");

        let payload: Value = serde_json::from_str(&msg.payload).unwrap();
        assert_eq!(payload["datasourcetype"], "mqtt");
        assert_eq!(payload["datasource"]["protocol"], "tcp");
        assert_eq!(payload["pollinterval"], "one_minute");
    }

    #[test]
    fn test_reading_message() {
        let reading = ProcessedReading {
            project: "plant".into(),
            subsystem: "boiler".into(),
            name: "temp".into(),
            t: 1_700_000_000_000,
            value: 21.5,
            unit: "C".into(),
        };
        let msg = reading_message(&reading).unwrap();
        assert_eq!(msg.topic, "readings/plant/boiler/temp");
        assert_eq!(
            serde_json::from_str::<Value>(&msg.payload).unwrap(),
            json!({
                "project": "plant",
                "subsystem": "boiler",
                "name": "temp",
                "t": 1_700_000_000_000_i64,
                "value": 21.5,
                "unit": "C"
            })
        );
    }
}
