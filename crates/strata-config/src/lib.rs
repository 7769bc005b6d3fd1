pub mod config;
pub mod connection;
pub mod locate;

pub use config::{CONFIG_FILE_NAME, StrataConfig, load_config, load_config_from_path};
pub use connection::{ConnectionError, detect_dialect, resolve_connection_string};
pub use locate::{ProjectLocation, locate_project};
