mod init_logging;
mod load_dotenv;
mod time;

pub use init_logging::init_logging;
pub use load_dotenv::load_dotenv;
pub use time::now_epoch_millis;
