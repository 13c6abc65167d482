pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const MQTT_HOST: &str = "MQTT_HOST";
pub const MQTT_PORT: &str = "MQTT_PORT";
