use crate::devcontainer::template::DevcontainerConfig;
use crate::devcontainer::RESERVED_PREFIX;
use crate::fs::FileSystem;
use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INPUT_PATH: &str = ".devcontainer/extensions.json";
pub const DEFAULT_OUTPUT_PATH: &str = ".devcontainer/devcontainer.json";

pub const INPUT_ENV: &str = "DEVCONTAINER_GEN_INPUT";
pub const OUTPUT_ENV: &str = "DEVCONTAINER_GEN_OUTPUT";
pub const PREFIX_ENV: &str = "DEVCONTAINER_GEN_PREFIX";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to load template {}: {message}", .path.display())]
    TemplateError { path: PathBuf, message: String },
}

/// Paths, prefix and template for one generator run.
///
/// `Default` starts from the documented literals and applies
/// `DEVCONTAINER_GEN_*` environment overrides; CLI flags are applied on top
/// with the `with_*` builders.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub reserved_prefix: String,
    pub template: DevcontainerConfig,
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let input_path = env::var(INPUT_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));

        let output_path = env::var(OUTPUT_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let reserved_prefix =
            env::var(PREFIX_ENV).unwrap_or_else(|_| RESERVED_PREFIX.to_string());

        Self {
            input_path,
            output_path,
            reserved_prefix,
            template: DevcontainerConfig::default(),
            dry_run: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_reserved_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reserved_prefix = prefix.into();
        self
    }

    pub fn with_template(mut self, template: DevcontainerConfig) -> Self {
        self.template = template;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Replaces the built-in template with the document stored at `path`.
    pub fn load_template(self, fs: &dyn FileSystem, path: &Path) -> Result<Self, ConfigError> {
        let content = fs
            .read_to_string(path)
            .map_err(|e| ConfigError::TemplateError {
                path: path.to_path_buf(),
                message: format!("{:#}", e),
            })?;

        let template =
            DevcontainerConfig::from_json(&content).map_err(|e| ConfigError::TemplateError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(self.with_template(template))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Input path must not be empty".to_string(),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Output path must not be empty".to_string(),
            ));
        }
        if normalized(&self.input_path) == normalized(&self.output_path) {
            return Err(ConfigError::ValidationFailed(format!(
                "Input and output paths must differ: {}",
                self.input_path.display()
            )));
        }
        if self.reserved_prefix.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Reserved prefix must not be empty, it would exclude every extension".to_string(),
            ));
        }

        Ok(())
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically
fn normalized(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator Configuration:")?;
        writeln!(f, "  Input: {}", self.input_path.display())?;
        writeln!(f, "  Output: {}", self.output_path.display())?;
        writeln!(f, "  Reserved Prefix: {}", self.reserved_prefix)?;
        writeln!(f, "  Template: {}", self.template.name)?;
        writeln!(f, "  Dry Run: {}", self.dry_run)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use serial_test::serial;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = [
            EnvGuard::unset(INPUT_ENV),
            EnvGuard::unset(OUTPUT_ENV),
            EnvGuard::unset(PREFIX_ENV),
        ];

        let config = GeneratorConfig::default();

        assert_eq!(config.input_path, PathBuf::from(".devcontainer/extensions.json"));
        assert_eq!(
            config.output_path,
            PathBuf::from(".devcontainer/devcontainer.json")
        );
        assert_eq!(config.reserved_prefix, "vscode.");
        assert_eq!(config.template, DevcontainerConfig::default());
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = [
            EnvGuard::set(INPUT_ENV, "/tmp/in.json"),
            EnvGuard::set(OUTPUT_ENV, "/tmp/out.json"),
            EnvGuard::set(PREFIX_ENV, "ms-vscode."),
        ];

        let config = GeneratorConfig::default();

        assert_eq!(config.input_path, PathBuf::from("/tmp/in.json"));
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.json"));
        assert_eq!(config.reserved_prefix, "ms-vscode.");
    }

    #[test]
    #[serial]
    fn test_empty_path_variables_fall_back() {
        let _guards = [EnvGuard::set(INPUT_ENV, ""), EnvGuard::set(OUTPUT_ENV, "")];

        let config = GeneratorConfig::default();

        assert_eq!(config.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeneratorConfig::new()
            .with_input_path("a.json")
            .with_output_path("b.json")
            .with_reserved_prefix("ms-")
            .with_dry_run(true);

        assert_eq!(config.input_path, PathBuf::from("a.json"));
        assert_eq!(config.output_path, PathBuf::from("b.json"));
        assert_eq!(config.reserved_prefix, "ms-");
        assert!(config.dry_run);
    }

    #[test]
    fn test_validation_rejects_empty_prefix() {
        let config = GeneratorConfig::new()
            .with_input_path("a.json")
            .with_output_path("b.json")
            .with_reserved_prefix("");

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("prefix"));
    }

    #[test]
    fn test_validation_rejects_same_paths() {
        let config = GeneratorConfig::new()
            .with_input_path("same.json")
            .with_output_path("same.json")
            .with_reserved_prefix("vscode.");

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_validation_rejects_equivalent_paths() {
        let cwd = env::current_dir().unwrap();
        let cases = [
            ("a.json", "./a.json"),
            (".devcontainer/extensions.json", ".devcontainer/../.devcontainer/extensions.json"),
        ];

        for (input, output) in cases {
            let config = GeneratorConfig::new()
                .with_input_path(input)
                .with_output_path(output)
                .with_reserved_prefix("vscode.");
            assert!(config.validate().is_err(), "{} vs {}", input, output);
        }

        let config = GeneratorConfig::new()
            .with_input_path("a.json")
            .with_output_path(cwd.join("a.json"))
            .with_reserved_prefix("vscode.");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_distinct_paths() {
        let config = GeneratorConfig::new()
            .with_input_path("./a.json")
            .with_output_path("./b/a.json")
            .with_reserved_prefix("vscode.");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_template() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "template.json",
            r#"{
                "name": "API Container",
                "dockerComposeFile": ["../docker-compose.yml"],
                "service": "api",
                "workspaceFolder": "/srv",
                "customizations": {"vscode": {"settings": {}, "extensions": ["stale.entry"]}}
            }"#,
        );

        let config = GeneratorConfig::new()
            .load_template(&fs, Path::new("template.json"))
            .unwrap();

        assert_eq!(config.template.name, "API Container");
        assert_eq!(config.template.service, "api");
    }

    #[test]
    fn test_load_template_missing_file() {
        let fs = MockFileSystem::new();

        let err = GeneratorConfig::new()
            .load_template(&fs, Path::new("missing.json"))
            .unwrap_err();

        match err {
            ConfigError::TemplateError { path, .. } => {
                assert_eq!(path, PathBuf::from("missing.json"))
            }
            _ => panic!("Expected TemplateError"),
        }
    }

    #[test]
    fn test_load_template_malformed() {
        let fs = MockFileSystem::new();
        fs.add_file("template.json", r#"{"name": 3}"#);

        let result = GeneratorConfig::new().load_template(&fs, Path::new("template.json"));
        assert!(matches!(result, Err(ConfigError::TemplateError { .. })));
    }

    #[test]
    fn test_display() {
        let config = GeneratorConfig::new()
            .with_input_path("in.json")
            .with_output_path("out.json");
        let rendered = config.to_string();

        assert!(rendered.contains("Input: in.json"));
        assert!(rendered.contains("Output: out.json"));
    }
}
