use anyhow::{anyhow, Result};

use dpc::datapoint::DatapointDescriptor;

use super::read_entries;
use crate::argsets::ValidateArgs;

pub fn validate(args: ValidateArgs) -> Result<()> {
    let entries = read_entries(&args.path)?;
    let mut invalid = 0;

    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<DatapointDescriptor>(entry) {
            Ok(dp) => println!("ok\t{}\t{}", dp.id(), dp.source_type()),
            Err(e) => {
                invalid += 1;
                log::debug!("Datapoint #{} rejected: {:?}", i, e);
                eprintln!("invalid\t#{}\t{}", i, e);
            }
        }
    }

    if invalid > 0 {
        return Err(anyhow!("{} datapoint(s) failed validation", invalid));
    }
    Ok(())
}
