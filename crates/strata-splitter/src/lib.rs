pub mod error;
pub mod split;

pub use error::SplitError;
pub use split::{SCRIPTS_DIR, split_script_log};
