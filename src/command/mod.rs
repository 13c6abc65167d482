mod process;
mod publish_config;
mod transform;
mod validate;

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use dpc::datapoint::DatapointDescriptor;

pub use process::process;
pub use publish_config::publish_config;
pub use transform::transform;
pub use validate::validate;

/// A configuration file holds either one datapoint object or an array of them
fn read_entries(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read '{}'", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not valid JSON", path.display()))?;
    match value {
        Value::Array(entries) => Ok(entries),
        Value::Object(_) => Ok(vec![value]),
        _ => Err(anyhow!(
            "'{}' must hold a datapoint object or an array of them",
            path.display()
        )),
    }
}

/// Every datapoint in the file, failing on the first invalid one
fn read_datapoints(path: &Path) -> Result<Vec<DatapointDescriptor>> {
    read_entries(path)?
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value(entry)
                .with_context(|| format!("Datapoint #{} in '{}' is invalid", i, path.display()))
        })
        .collect()
}
