mod argsets;
mod command;

use std::ffi::OsString;

use anyhow::{anyhow, Result};
use dpc::helpers;

const CMD_VALIDATE: &str = "validate";
const CMD_TRANSFORM: &str = "transform";
const CMD_PROCESS: &str = "process";
const CMD_PUBLISH_CONFIG: &str = "publish-config";

const FLAG_PUBLISH: &str = "--publish";

fn main() -> Result<()> {
    helpers::load_dotenv();
    helpers::init_logging();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_VALIDATE) => command::validate(argsets::ValidateArgs {
            path: args.free_from_str()?,
        }),
        Some(CMD_TRANSFORM) => {
            let path = args.free_from_str()?;
            let values = parse_values(args.finish())?;
            command::transform(argsets::TransformArgs { path, values })
        }
        Some(CMD_PROCESS) => {
            let publish = args.contains(FLAG_PUBLISH);
            command::process(argsets::ProcessArgs {
                datapoints: args.free_from_str()?,
                readings: args.free_from_str()?,
                publish,
            })
        }
        Some(CMD_PUBLISH_CONFIG) => command::publish_config(argsets::PublishConfigArgs {
            org_id: args.free_from_str()?,
            path: args.free_from_str()?,
        }),
        _ => Err(anyhow!(
            "Subcommand must be one of 'validate', 'transform', 'process', 'publish-config'"
        )),
    }
}

/// Raw readings given on the command line; negative values need `--` in front
fn parse_values(raw: Vec<OsString>) -> Result<Vec<f64>> {
    if raw.is_empty() {
        return Err(anyhow!("At least one raw value is required"));
    }
    raw.iter()
        .map(|value| {
            let text = value.to_string_lossy();
            text.parse::<f64>()
                .map_err(|_| anyhow!("'{}' is not a number", text))
        })
        .collect()
}
