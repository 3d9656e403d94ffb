//! Generator orchestration
//!
//! `ConfigGenerator::generate` runs the three stages in order:
//! 1. Load the extension list from the input path
//! 2. Filter out identifiers under the reserved prefix
//! 3. Render the template with the surviving identifiers and write it
//!
//! Each run builds the document from scratch; the previous output file is
//! never read.
//!
//! # Example
//!
//! ```no_run
//! use devcontainer_gen::{ConfigGenerator, GeneratorConfig};
//!
//! let generator = ConfigGenerator::new(GeneratorConfig::default());
//! match generator.generate() {
//!     Ok(report) => println!("{}", report.summary()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use super::extensions::{filter_active_extensions, load_extensions, InvalidDescriptor};
use crate::config::GeneratorConfig;
use crate::fs::{FileSystem, RealFileSystem};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Fatal generator failures. Both end the run with exit status 1.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Input missing, unreadable, not JSON, or not an array
    #[error("Error reading {}: {message}", .path.display())]
    ReadFailure { path: PathBuf, message: String },

    /// Output could not be rendered or written
    #[error("Error writing {}: {message}", .path.display())]
    WriteFailure { path: PathBuf, message: String },
}

impl GeneratorError {
    fn read(path: &Path, error: impl std::fmt::Display) -> Self {
        GeneratorError::ReadFailure {
            path: path.to_path_buf(),
            message: format!("{:#}", error),
        }
    }

    fn write(path: &Path, error: impl std::fmt::Display) -> Self {
        GeneratorError::WriteFailure {
            path: path.to_path_buf(),
            message: format!("{:#}", error),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            GeneratorError::ReadFailure { path, .. } | GeneratorError::WriteFailure { path, .. } => {
                path
            }
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub active_extensions: Vec<String>,
    pub invalid_descriptors: Vec<InvalidDescriptor>,
    /// The serialized document, as written (or as it would be in a dry run)
    pub rendered: String,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn active_count(&self) -> usize {
        self.active_extensions.len()
    }

    /// One-line confirmation for the console
    pub fn summary(&self) -> String {
        let mut line = format!(
            "File '{}' generated with {} active extensions.",
            self.output_path.display(),
            self.active_count()
        );
        if !self.invalid_descriptors.is_empty() {
            line.push_str(&format!(
                " ({} invalid descriptors skipped)",
                self.invalid_descriptors.len()
            ));
        }
        line
    }
}

pub struct ConfigGenerator<F: FileSystem = RealFileSystem> {
    config: GeneratorConfig,
    fs: F,
}

impl ConfigGenerator<RealFileSystem> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_fs(config, RealFileSystem::new())
    }
}

impl<F: FileSystem> ConfigGenerator<F> {
    pub fn with_fs(config: GeneratorConfig, fs: F) -> Self {
        Self { config, fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn generate(&self) -> Result<GenerationReport, GeneratorError> {
        let input_path = &self.config.input_path;
        let output_path = &self.config.output_path;

        debug!(path = %input_path.display(), "Loading extensions");
        let loaded =
            load_extensions(&self.fs, input_path).map_err(|e| GeneratorError::read(input_path, e))?;

        let active = filter_active_extensions(&loaded.descriptors, &self.config.reserved_prefix);
        debug!(
            total = loaded.descriptors.len(),
            active = active.len(),
            prefix = %self.config.reserved_prefix,
            "Filtered built-in extensions"
        );

        let document = self.config.template.with_extensions(active);
        let rendered = document
            .to_json_pretty()
            .map_err(|e| GeneratorError::write(output_path, e))?;

        if self.config.dry_run {
            debug!(path = %output_path.display(), "Dry run, skipping write");
        } else {
            self.fs
                .write_string(output_path, &rendered)
                .map_err(|e| GeneratorError::write(output_path, e))?;
            info!(
                path = %output_path.display(),
                extensions = document.extensions().len(),
                "Devcontainer configuration written"
            );
        }

        Ok(GenerationReport {
            output_path: output_path.clone(),
            active_extensions: document.customizations.vscode.extensions,
            invalid_descriptors: loaded.invalid,
            rendered,
            dry_run: self.config.dry_run,
        })
    }
}
