//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// Abstraction over the file operations the generator performs
pub trait FileSystem: Send + Sync {
    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace the file's contents with `contents`, creating it if needed.
    /// Missing parent directories are an error.
    fn write_string(&self, path: &Path, contents: &str) -> Result<()>;
}
