use env_logger::Env;

use crate::constants::{defaults, envvars};

/// Initialise env_logger from LOG_LEVEL, defaulting to "info"
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .format_timestamp(None)
        .init();
}
