use std::collections::HashMap;
use std::fs;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use dpc::datapoint::{DatapointId, RawReading};
use dpc::helpers;
use dpc::interfaces::{reading_message, MqttPublisher, Publisher};
use dpc::processing::batch::{process_batch, ReadingJob};
use dpc::processing::JsonataEvaluator;

use super::read_datapoints;
use crate::argsets::ProcessArgs;

/// Readings acquired for one datapoint
#[derive(Deserialize)]
struct ReadingSet {
    project: String,
    subsystem: String,
    name: String,
    readings: Vec<ReadingInput>,
}

/// A reading without `poll_time` counts as polled when the command started
#[derive(Deserialize)]
struct ReadingInput {
    value: f64,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    poll_time: Option<i64>,
}

pub fn process(args: ProcessArgs) -> Result<()> {
    let datapoints = read_datapoints(&args.datapoints)?;
    let by_id: HashMap<&DatapointId, _> = datapoints.iter().map(|dp| (dp.id(), dp)).collect();

    let text = fs::read_to_string(&args.readings)
        .with_context(|| format!("Could not read '{}'", args.readings.display()))?;
    let sets: Vec<ReadingSet> = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a list of reading sets", args.readings.display()))?;

    let now = helpers::now_epoch_millis();
    let jobs = sets
        .into_iter()
        .map(|set| {
            let id = DatapointId::new(set.project, set.subsystem, set.name);
            let datapoint = by_id
                .get(&id)
                .copied()
                .ok_or_else(|| anyhow!("No datapoint configured for {}", id))?;
            let readings = set
                .readings
                .into_iter()
                .map(|input| RawReading {
                    value: input.value,
                    timestamp: input.timestamp,
                    poll_time: input.poll_time.unwrap_or(now),
                })
                .collect();
            Ok(ReadingJob {
                datapoint,
                readings,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let outcomes = process_batch(&jobs, &JsonataEvaluator);

    let mut messages = Vec::new();
    for outcome in &outcomes {
        for result in &outcome.results {
            match result {
                Ok(Some(reading)) => {
                    println!("{}", serde_json::to_string(reading)?);
                    if args.publish {
                        messages.push(reading_message(reading)?);
                    }
                }
                Ok(None) => log::debug!("Reading for {} filtered", outcome.datapoint),
                Err(e) => eprintln!("{}\t{}", outcome.datapoint, e),
            }
        }
    }

    if args.publish {
        log::info!("Publishing {} reading(s)", messages.len());
        MqttPublisher::from_env().publish(&messages)?;
    }
    Ok(())
}
