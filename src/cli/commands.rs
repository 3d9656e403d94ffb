use clap::Parser;
use std::path::PathBuf;

/// Generates a devcontainer configuration from an exported extension list
#[derive(Parser, Debug, Clone)]
#[command(
    name = "devcontainer-gen",
    about = "Generate .devcontainer/devcontainer.json from an exported extension list",
    version,
    long_about = "devcontainer-gen reads .devcontainer/extensions.json (a JSON array of \
                  {\"id\": \"<publisher>.<name>\"} objects), drops the editor's built-in \
                  extensions (ids starting with \"vscode.\"), and writes the rest into a \
                  fresh .devcontainer/devcontainer.json.\n\n\
                  Examples:\n  \
                  devcontainer-gen\n  \
                  devcontainer-gen --input exported.json --output .devcontainer/devcontainer.json\n  \
                  devcontainer-gen --template base.json --dry-run"
)]
pub struct CliArgs {
    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        help = "Extension list to read [default: .devcontainer/extensions.json]"
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Devcontainer file to write [default: .devcontainer/devcontainer.json]"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "PREFIX",
        help = "Identifier prefix of built-in extensions to drop [default: vscode.]"
    )]
    pub prefix: Option<String>,

    #[arg(
        short = 't',
        long,
        value_name = "FILE",
        help = "Devcontainer document to use as the template instead of the built-in one"
    )]
    pub template: Option<PathBuf>,

    #[arg(long, help = "Print the generated document instead of writing it")]
    pub dry_run: bool,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}
