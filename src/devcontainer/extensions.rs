//! Extension descriptors: loading the exported list and filtering built-ins

use crate::fs::FileSystem;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Identifiers under this namespace ship with the editor itself
pub const RESERVED_PREFIX: &str = "vscode.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub id: String,
}

/// An array element that could not be read as a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDescriptor {
    pub index: usize,
    pub reason: String,
}

impl fmt::Display for InvalidDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "descriptor #{}: {}", self.index, self.reason)
    }
}

impl ExtensionDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Reads the `id` of one array element. Other fields are ignored.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, InvalidDescriptor> {
        let object = value.as_object().ok_or_else(|| InvalidDescriptor {
            index,
            reason: format!("expected an object, found {}", json_kind(value)),
        })?;

        match object.get("id") {
            Some(Value::String(id)) => Ok(Self::new(id.clone())),
            Some(other) => Err(InvalidDescriptor {
                index,
                reason: format!("\"id\" must be a string, found {}", json_kind(other)),
            }),
            None => Err(InvalidDescriptor {
                index,
                reason: "missing \"id\" field".to_string(),
            }),
        }
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.id.starts_with(prefix)
    }
}

/// Result of the load stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedExtensions {
    pub descriptors: Vec<ExtensionDescriptor>,
    pub invalid: Vec<InvalidDescriptor>,
}

/// Parses the exported extension list. The top-level value must be an array;
/// malformed elements are collected rather than rejected.
pub fn parse_extensions(json: &str) -> Result<LoadedExtensions> {
    let value: Value = serde_json::from_str(json).context("Invalid JSON")?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(anyhow!(
                "expected a JSON array of extension descriptors, found {}",
                json_kind(&other)
            ))
        }
    };

    let mut loaded = LoadedExtensions::default();
    for (index, item) in items.iter().enumerate() {
        match ExtensionDescriptor::from_value(index, item) {
            Ok(descriptor) => loaded.descriptors.push(descriptor),
            Err(invalid) => {
                warn!(index = invalid.index, reason = %invalid.reason, "Skipping invalid extension descriptor");
                loaded.invalid.push(invalid);
            }
        }
    }

    Ok(loaded)
}

pub fn load_extensions(fs: &dyn FileSystem, path: &Path) -> Result<LoadedExtensions> {
    let content = fs.read_to_string(path)?;
    let loaded = parse_extensions(&content)?;
    debug!(
        path = %path.display(),
        descriptors = loaded.descriptors.len(),
        invalid = loaded.invalid.len(),
        "Loaded extension descriptors"
    );
    Ok(loaded)
}

/// Identifiers that do not start with `prefix`, in input order
pub fn filter_active_extensions(descriptors: &[ExtensionDescriptor], prefix: &str) -> Vec<String> {
    descriptors
        .iter()
        .filter(|d| !d.has_prefix(prefix))
        .map(|d| d.id.clone())
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
