//! Structured logging setup
//!
//! Logs go to stderr through `tracing`, so stdout only ever carries the
//! generator's own confirmation or error line (or the document in a dry run).
//!
//! Level resolution, first match wins:
//! 1. `--log-level <LEVEL>`
//! 2. `-v` (debug) or `-q` (error)
//! 3. `DEVCONTAINER_GEN_LOG_LEVEL`
//! 4. `warn`
//!
//! `RUST_LOG`, when set, replaces the crate directive entirely.
//! `DEVCONTAINER_GEN_LOG_JSON=true` switches to JSON lines.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_LEVEL_ENV: &str = "DEVCONTAINER_GEN_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "DEVCONTAINER_GEN_LOG_JSON";

const CRATE_TARGET: &str = "devcontainer_gen";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Emit JSON lines instead of the human formatter
    pub use_json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
        }
    }
}

impl LoggingConfig {
    /// Builds the configuration from CLI flags, falling back to the
    /// environment when no flag decides the level.
    pub fn resolve(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let defaults = Self::default();

        let level = if let Some(level_str) = log_level {
            parse_level(level_str)
        } else if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            env::var(LOG_LEVEL_ENV)
                .map(|v| parse_level(&v))
                .unwrap_or(defaults.level)
        };

        let use_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(defaults.use_json);

        Self { level, use_json }
    }
}

/// Parses a log level, case-insensitively. Unknown values fall back to WARN.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    EnvFilter::new("off").add_directive(
        format!("{}={}", CRATE_TARGET, level)
            .parse()
            .expect("static directive is valid"),
    )
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
