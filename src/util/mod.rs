//! Utility modules for devcontainer-gen

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
