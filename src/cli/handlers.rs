use super::commands::CliArgs;
use crate::config::{ConfigError, GeneratorConfig};
use crate::devcontainer::ConfigGenerator;
use crate::fs::{FileSystem, RealFileSystem};
use std::io::{self, Write};
use tracing::{debug, error};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Applies CLI flags on top of the environment-derived defaults.
pub fn build_config(args: &CliArgs, fs: &dyn FileSystem) -> Result<GeneratorConfig, ConfigError> {
    let mut config = GeneratorConfig::default().with_dry_run(args.dry_run);

    if let Some(input) = &args.input {
        config = config.with_input_path(input);
    }
    if let Some(output) = &args.output {
        config = config.with_output_path(output);
    }
    if let Some(prefix) = &args.prefix {
        config = config.with_reserved_prefix(prefix);
    }
    if let Some(template) = &args.template {
        config = config.load_template(fs, template)?;
    }

    config.validate()?;
    Ok(config)
}

pub fn handle_generate(args: &CliArgs) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_generate(args, RealFileSystem::new(), &mut out)
}

/// Runs one generation and returns the process exit code. Confirmation and
/// failure lines both go to `out`.
pub fn run_generate<F: FileSystem, W: Write>(args: &CliArgs, fs: F, out: &mut W) -> i32 {
    let config = match build_config(args, &fs) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            let _ = writeln!(out, "{}", e);
            return EXIT_FAILURE;
        }
    };
    debug!("{}", config);

    let generator = ConfigGenerator::with_fs(config, fs);
    match generator.generate() {
        Ok(report) => {
            let line = if report.dry_run {
                report.rendered
            } else {
                report.summary()
            };
            let _ = writeln!(out, "{}", line);
            EXIT_SUCCESS
        }
        Err(e) => {
            error!(path = %e.path().display(), "{}", e);
            let _ = writeln!(out, "{}", e);
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use clap::Parser;
    use serial_test::serial;
    use std::path::Path;

    fn run(argv: &[&str], fs: MockFileSystem) -> (i32, String) {
        let mut argv_full = vec!["devcontainer-gen"];
        argv_full.extend_from_slice(argv);
        let args = CliArgs::parse_from(argv_full);
        let mut out = Vec::new();
        let code = run_generate(&args, fs, &mut out);
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    #[serial]
    fn test_success_message() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "in.json",
            r#"[{"id":"vscode.git"},{"id":"esbenp.prettier-vscode"},{"id":"vscode.debug"}]"#,
        );

        let (code, stdout) = run(&["-i", "in.json", "-o", "out.json"], fs);

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            stdout,
            "File 'out.json' generated with 1 active extensions.\n"
        );
    }

    #[test]
    #[serial]
    fn test_read_failure_message() {
        let (code, stdout) = run(&["-i", "missing.json", "-o", "out.json"], MockFileSystem::new());

        assert_eq!(code, EXIT_FAILURE);
        assert!(stdout.starts_with("Error reading missing.json: "));
    }

    #[test]
    #[serial]
    fn test_write_failure_message() {
        let fs = MockFileSystem::new();
        fs.add_file("in.json", "[]");
        fs.add_dir("locked");
        fs.set_read_only("locked");

        let (code, stdout) = run(&["-i", "in.json", "-o", "locked/out.json"], fs);

        assert_eq!(code, EXIT_FAILURE);
        assert!(stdout.starts_with("Error writing locked/out.json: "));
    }

    #[test]
    #[serial]
    fn test_dry_run_prints_document() {
        let fs = MockFileSystem::new();
        fs.add_file("in.json", r#"[{"id":"golang.go"}]"#);

        let (code, stdout) = run(&["-i", "in.json", "-o", "out.json", "--dry-run"], fs);

        assert_eq!(code, EXIT_SUCCESS);
        let doc: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
        assert_eq!(
            doc["customizations"]["vscode"]["extensions"],
            serde_json::json!(["golang.go"])
        );
    }

    #[test]
    #[serial]
    fn test_invalid_configuration() {
        let fs = MockFileSystem::new();
        fs.add_file("in.json", "[]");

        let (code, stdout) = run(&["-i", "in.json", "-o", "in.json"], fs);

        assert_eq!(code, EXIT_FAILURE);
        assert!(stdout.contains("Input and output paths must differ"));
    }

    #[test]
    #[serial]
    fn test_template_flag() {
        let fs = MockFileSystem::new();
        fs.add_file("in.json", r#"[{"id":"golang.go"}]"#);
        fs.add_file(
            "base.json",
            r#"{
                "name": "Go Container",
                "dockerComposeFile": ["../compose.yml"],
                "service": "app",
                "workspaceFolder": "/go/src",
                "customizations": {"vscode": {"settings": {"go.useLanguageServer": true}}}
            }"#,
        );

        let args = CliArgs::parse_from([
            "devcontainer-gen",
            "-i",
            "in.json",
            "-o",
            "out.json",
            "-t",
            "base.json",
        ]);
        let config = build_config(&args, &fs).unwrap();
        let generator = ConfigGenerator::with_fs(config, fs);
        generator.generate().unwrap();

        let written = generator.fs().read_to_string(Path::new("out.json")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(doc["name"], "Go Container");
        assert_eq!(doc["customizations"]["vscode"]["extensions"], serde_json::json!(["golang.go"]));
    }
}
