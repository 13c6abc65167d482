use std::env;

const ENV_FILE_VAR: &str = "DPC_ENV_FILE";

/// Load `.env` and, if named by DPC_ENV_FILE, an additional env file.
///
/// Runs before logging is set up, so problems go straight to stderr.
pub fn load_dotenv() {
    let _ = dotenv::dotenv();
    if let Ok(env_file) = env::var(ENV_FILE_VAR) {
        if let Err(e) = dotenv::from_path(&env_file) {
            eprintln!("Could not load {env_file}: {e}");
        }
    }
}
