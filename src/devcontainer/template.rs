//! Devcontainer document model and serialization
//!
//! The generated file is a fixed-shape document. Only
//! `customizations.vscode.extensions` changes between runs; everything else
//! comes from the template, either the built-in one or a template file.
//!
//! Output is pure ASCII: anything outside printable ASCII is written as a
//! `\uXXXX` escape, with surrogate pairs above the BMP.

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Map, Value};
use std::io;

pub const DEFAULT_NAME: &str = "Smart-fees Frontend Container";
pub const DEFAULT_SERVICE: &str = "web";
pub const DEFAULT_WORKSPACE_FOLDER: &str = "/app";
pub const DEFAULT_COMPOSE_FILES: [&str; 2] =
    ["../docker-compose.yml", "../docker-compose.override.yml"];
pub const DEFAULT_FORMATTER: &str = "esbenp.prettier-vscode";

const INDENT: &[u8] = b"    ";

/// A devcontainer.json document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevcontainerConfig {
    pub name: String,
    pub docker_compose_file: Vec<String>,
    pub service: String,
    pub workspace_folder: String,
    pub customizations: Customizations,

    /// Keys a template file carries beyond the fixed shape; written back verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Customizations {
    pub vscode: VscodeCustomizations,

    /// Other tools' customizations, e.g. `codespaces`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VscodeCustomizations {
    #[serde(default)]
    pub settings: Map<String, Value>,
    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for DevcontainerConfig {
    fn default() -> Self {
        let mut settings = Map::new();
        settings.insert(
            "editor.defaultFormatter".to_string(),
            Value::String(DEFAULT_FORMATTER.to_string()),
        );
        settings.insert("editor.formatOnSave".to_string(), Value::Bool(true));

        Self {
            name: DEFAULT_NAME.to_string(),
            docker_compose_file: DEFAULT_COMPOSE_FILES.iter().map(|s| s.to_string()).collect(),
            service: DEFAULT_SERVICE.to_string(),
            workspace_folder: DEFAULT_WORKSPACE_FOLDER.to_string(),
            customizations: Customizations {
                vscode: VscodeCustomizations {
                    settings,
                    extensions: Vec::new(),
                    extra: Map::new(),
                },
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }
}

impl DevcontainerConfig {
    /// Parses a template document. Any extensions it lists are kept until
    /// `with_extensions` replaces them.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Copy of this document with the extension list replaced
    pub fn with_extensions(&self, extensions: Vec<String>) -> Self {
        let mut config = self.clone();
        config.customizations.vscode.extensions = extensions;
        config
    }

    pub fn extensions(&self) -> &[String] {
        &self.customizations.vscode.extensions
    }

    /// Serializes with four-space indentation and no trailing newline.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter::new());
        self.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(serde::ser::Error::custom)
    }
}

/// `PrettyFormatter` with four-space indent that escapes non-ASCII text
struct AsciiFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> AsciiFormatter<'a> {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        // fragments never contain quotes, backslashes or control characters below 0x20
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if (' '..='~').contains(&c) {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
