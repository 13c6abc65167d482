pub mod mqtt;
pub mod publish;

pub use mqtt::MqttPublisher;
pub use publish::{config_message, reading_message, Message, PublishError, Publisher};
