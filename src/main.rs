use devcontainer_gen::cli::{handle_generate, CliArgs};
use devcontainer_gen::util::{init_logging, LoggingConfig};
use devcontainer_gen::{NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::resolve(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle_generate(&args);

    process::exit(exit_code);
}
