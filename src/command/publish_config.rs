use anyhow::Result;

use dpc::interfaces::{config_message, MqttPublisher, Publisher};

use super::read_datapoints;
use crate::argsets::PublishConfigArgs;

pub fn publish_config(args: PublishConfigArgs) -> Result<()> {
    let messages = read_datapoints(&args.path)?
        .iter()
        .map(|dp| config_message(args.org_id, dp))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "Publishing configuration of {} datapoint(s) for organisation {}",
        messages.len(),
        args.org_id
    );
    MqttPublisher::from_env().retained(true).publish(&messages)?;

    for message in &messages {
        println!("{}", message.topic);
    }
    Ok(())
}
