use std::time::Duration;

pub const LOG_LEVEL: &str = "info";

pub const MQTT_HOST: &str = "localhost";
pub const MQTT_PORT: u16 = 1883;
pub const MQTT_KEEP_ALIVE: Duration = Duration::from_secs(30);
pub const MQTT_CLIENT_PREFIX: &str = "dpc";
