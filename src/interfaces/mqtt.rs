use std::env;

use once_cell::sync::Lazy;
use rumqttc::{Client, Connection, Event, MqttOptions, Packet, QoS};

use super::publish::{Message, PublishError, Publisher};
use crate::constants::{defaults, envvars};

static MQTT_HOST: Lazy<String> = Lazy::new(host_from_env);
static MQTT_PORT: Lazy<u16> = Lazy::new(port_from_env);

fn host_from_env() -> String {
    if let Ok(host) = env::var(envvars::MQTT_HOST) {
        return host;
    }
    defaults::MQTT_HOST.to_string()
}

fn port_from_env() -> u16 {
    if let Ok(port_str) = env::var(envvars::MQTT_PORT) {
        if let Ok(port) = port_str.parse::<u16>() {
            return port;
        }
        log::warn!("Ignoring invalid {}='{}'", envvars::MQTT_PORT, port_str);
    }
    defaults::MQTT_PORT
}

pub fn get_rand_client_id(prefix: Option<&str>) -> String {
    let randhex = hex::encode(rand::random::<[u8; 3]>());

    if let Some(pref) = prefix {
        format!("{pref}-{randhex}")
    } else {
        randhex
    }
}

/// Broker address from the environment, falling back to localhost:1883
pub fn broker_from_env() -> (String, u16) {
    (MQTT_HOST.clone(), *MQTT_PORT)
}

/// Publishes each batch over a fresh connection and waits for every PubAck
pub struct MqttPublisher {
    host: String,
    port: u16,
    retain: bool,
}

impl MqttPublisher {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            retain: false,
        }
    }

    pub fn from_env() -> Self {
        let (host, port) = broker_from_env();
        Self::new(host, port)
    }

    /// Retained messages are delivered to late subscribers, which suits configuration
    pub fn retained(mut self, retain: bool) -> Self {
        self.retain = retain;
        self
    }

    fn client_conn(&self, client_id: String) -> (Client, Connection) {
        log::info!(
            "Establishing MQTT connection to {}:{} as {}",
            self.host,
            self.port,
            client_id
        );

        let mut mqttoptions = MqttOptions::new(client_id, self.host.clone(), self.port);
        mqttoptions.set_clean_session(true);
        mqttoptions.set_keep_alive(defaults::MQTT_KEEP_ALIVE);

        Client::new(mqttoptions, 10)
    }
}

impl Publisher for MqttPublisher {
    fn publish(&mut self, messages: &[Message]) -> Result<(), PublishError> {
        if messages.is_empty() {
            return Ok(());
        }
        let (client, mut connection) =
            self.client_conn(get_rand_client_id(Some(defaults::MQTT_CLIENT_PREFIX)));

        let mut expected_msg_acks = messages.len();

        for msg in messages.iter() {
            log::debug!("Publishing to {}: {}", msg.topic, msg.payload);

            client.publish(
                msg.topic.clone(),
                QoS::AtLeastOnce,
                self.retain,
                msg.payload.as_bytes(),
            )?;
        }

        for notification in connection.iter() {
            log::trace!("Notification = {:?}", notification);
            match notification {
                Ok(Event::Incoming(Packet::PubAck(_))) => expected_msg_acks -= 1,
                Err(e) => return Err(e.into()),
                _ => (),
            }
            if expected_msg_acks == 0 {
                break;
            }
        }
        client.disconnect()?;
        Ok(())
    }
}
