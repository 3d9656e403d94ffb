pub mod commands;
pub mod handlers;

pub use commands::CliArgs;
pub use handlers::{build_config, handle_generate};
