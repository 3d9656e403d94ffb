//! devcontainer-gen - devcontainer configuration from an exported extension list
//!
//! Reads a JSON array of editor extension descriptors, drops the editor's
//! built-in extensions (identifiers under the `vscode.` namespace), and writes
//! the remaining identifiers into a devcontainer.json template.
//!
//! # Example Usage
//!
//! ```no_run
//! use devcontainer_gen::{ConfigGenerator, GeneratorConfig};
//!
//! let config = GeneratorConfig::default()
//!     .with_input_path(".devcontainer/extensions.json")
//!     .with_output_path(".devcontainer/devcontainer.json");
//!
//! let report = ConfigGenerator::new(config).generate()?;
//! println!("{}", report.summary());
//! # Ok::<(), devcontainer_gen::GeneratorError>(())
//! ```
//!
//! # Project Structure
//!
//! - [`devcontainer`]: descriptor loading, filtering, the document model and
//!   the generator itself
//! - [`config`]: paths, prefix and template for a run
//! - [`fs`]: file system abstraction with a real and an in-memory backend
//! - [`cli`]: command-line arguments and the handler behind `main`

pub mod cli;
pub mod config;
pub mod devcontainer;
pub mod fs;
pub mod util;

pub use config::{ConfigError, GeneratorConfig};
pub use devcontainer::{
    ConfigGenerator, DevcontainerConfig, ExtensionDescriptor, GenerationReport, GeneratorError,
    InvalidDescriptor, RESERVED_PREFIX,
};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
