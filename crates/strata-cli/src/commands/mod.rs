pub mod init;
pub mod new;
pub mod split;
pub mod status;

pub use init::cmd_init;
pub use new::cmd_new;
pub use split::cmd_split;
pub use status::cmd_status;
