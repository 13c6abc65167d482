use anyhow::{anyhow, Result};

use dpc::processing::{JsonataEvaluator, Transformed};

use super::read_datapoints;
use crate::argsets::TransformArgs;

pub fn transform(args: TransformArgs) -> Result<()> {
    let mut datapoints = read_datapoints(&args.path)?;
    if datapoints.len() != 1 {
        return Err(anyhow!(
            "Expected exactly one datapoint, found {}",
            datapoints.len()
        ));
    }
    let dp = datapoints.remove(0);
    log::info!("Transforming {} value(s) for {}", args.values.len(), dp.id());

    for raw in args.values {
        match dp.processing().transform_with(raw, &JsonataEvaluator) {
            Ok(Transformed::Value(value)) => println!("{}\t{}", raw, value),
            Ok(Transformed::Filtered) => println!("{}\tfiltered", raw),
            Err(e) => println!("{}\terror: {}", raw, e),
        }
    }
    Ok(())
}
