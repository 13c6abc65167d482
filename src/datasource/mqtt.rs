use serde::{Deserialize, Serialize, Serializer};

use super::timestamp::{TimestampType, TIMESTAMP_TYPES};
use super::{OriginDocumentFormat, DOCUMENT_FORMATS};
use crate::columns::{self, ColumnDecode, FieldSetter};
use crate::constants::defaults;
use crate::lenient;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MqttProtocol {
    Mqtt,
    Mqtts,
    Tcp,
    Tls,
    Ws,
    Wss,
    Wxs,
    Alis,
}

const PROTOCOLS: &[(&str, MqttProtocol)] = &[
    ("mqtt", MqttProtocol::Mqtt),
    ("mqtts", MqttProtocol::Mqtts),
    ("tcp", MqttProtocol::Tcp),
    ("tls", MqttProtocol::Tls),
    ("ws", MqttProtocol::Ws),
    ("wss", MqttProtocol::Wss),
    ("wxs", MqttProtocol::Wxs),
    ("alis", MqttProtocol::Alis),
];

/// Messages received from a subscription on an MQTT broker
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttDatasource {
    /// `None` until a recognised protocol has been configured; written as `""`
    #[serde(
        serialize_with = "serialize_protocol",
        deserialize_with = "lenient::or_default"
    )]
    pub protocol: Option<MqttProtocol>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub address: String,
    #[serde(deserialize_with = "lenient::port_or_default")]
    pub port: u16,
    #[serde(deserialize_with = "lenient::or_default")]
    pub topic: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub username: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub password: String,
    #[serde(rename = "doctype", deserialize_with = "lenient::or_default")]
    pub format: OriginDocumentFormat,
    #[serde(rename = "dataexpr", deserialize_with = "lenient::or_default")]
    pub value_expression: String,
    #[serde(rename = "tstype", deserialize_with = "lenient::or_default")]
    pub timestamp_type: TimestampType,
    #[serde(rename = "tsexpr", deserialize_with = "lenient::or_default")]
    pub timestamp_expression: String,
}

fn serialize_protocol<S>(protocol: &Option<MqttProtocol>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match protocol {
        Some(protocol) => protocol.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

impl ColumnDecode for MqttDatasource {
    const FIELDS: &'static [(&'static str, FieldSetter<Self>)] = &[
        ("protocol", |ds, d| {
            match columns::lookup(PROTOCOLS, &columns::text(d)) {
                Some(protocol) => ds.protocol = Some(protocol),
                None => log::debug!("Keeping previous MQTT protocol"),
            }
        }),
        ("address", |ds, d| ds.address = columns::text(d)),
        ("port", |ds, d| ds.port = parse_port(d)),
        ("topic", |ds, d| ds.topic = columns::text(d)),
        ("username", |ds, d| ds.username = columns::text(d)),
        ("password", |ds, d| ds.password = columns::text(d)),
        ("doctype", |ds, d| {
            columns::lookup_or_retain(&mut ds.format, d, DOCUMENT_FORMATS)
        }),
        ("dataexpr", |ds, d| ds.value_expression = columns::text(d)),
        ("tstype", |ds, d| {
            columns::lookup_or_retain(&mut ds.timestamp_type, d, TIMESTAMP_TYPES)
        }),
        ("tsexpr", |ds, d| ds.timestamp_expression = columns::text(d)),
    ];
}

/// Unlike other numeric columns, an unparseable port falls back to the MQTT default
fn parse_port(data: &[u8]) -> u16 {
    let raw = columns::text(data);
    raw.trim().parse().unwrap_or_else(|_| {
        log::warn!("Invalid MQTT port '{}'; using {}", raw, defaults::MQTT_PORT);
        defaults::MQTT_PORT
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::from_pairs;

    #[test]
    fn test_decode_mqtt_columns() {
        let ds = MqttDatasource::from_columns(&from_pairs([
            ("protocol", "mqtts"),
            ("address", "broker.example"),
            ("port", "8883"),
            ("topic", "sensors/1"),
        ]));
        assert_eq!(
            ds,
            MqttDatasource {
                protocol: Some(MqttProtocol::Mqtts),
                address: "broker.example".into(),
                port: 8883,
                topic: "sensors/1".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_bogus_protocol_leaves_zero_value() {
        let ds = MqttDatasource::from_columns(&from_pairs([
            ("protocol", "bogus"),
            ("address", "broker.example"),
            ("port", "8883"),
            ("topic", "sensors/1"),
        ]));
        assert_eq!(ds.protocol, None);
        assert_eq!(ds.address, "broker.example");
        assert_eq!(ds.port, 8883);
        assert_eq!(ds.topic, "sensors/1");
    }

    #[test]
    fn test_bogus_protocol_keeps_previous_protocol() {
        let mut ds = MqttDatasource {
            protocol: Some(MqttProtocol::Ws),
            ..Default::default()
        };
        ds.decode_column("protocol", b"bogus");
        assert_eq!(ds.protocol, Some(MqttProtocol::Ws));
    }

    #[test]
    fn test_port_fallback() {
        for bad in ["", "abc", "70000", "-1"] {
            let mut ds = MqttDatasource {
                port: 1234,
                ..Default::default()
            };
            ds.decode_column("port", bad.as_bytes());
            assert_eq!(ds.port, 1883, "port payload {bad:?}");
        }
    }

    #[test]
    fn test_json_names() {
        let ds: MqttDatasource = serde_json::from_str(
            r#"{"protocol":"wss","address":"b","port":443,"doctype":"xml","tstype":"epochMillis"}"#,
        )
        .unwrap();
        assert_eq!(ds.protocol, Some(MqttProtocol::Wss));
        assert_eq!(ds.format, OriginDocumentFormat::Xml);
        assert_eq!(ds.timestamp_type, TimestampType::EpochMillis);
        assert_eq!(ds.port, 443);
    }

    #[test]
    fn test_unset_protocol_is_written_as_empty_text() {
        let json = serde_json::to_value(MqttDatasource::default()).unwrap();
        assert_eq!(json["protocol"], "");

        let back: MqttDatasource = serde_json::from_value(json).unwrap();
        assert_eq!(back.protocol, None);

        let json = serde_json::to_value(MqttDatasource {
            protocol: Some(MqttProtocol::Tls),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["protocol"], "tls");
    }
}
