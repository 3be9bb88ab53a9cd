//! CLI module for shotvars
//!
//! One-shot commands over a base directory:
//! - list / show / versions: read-only views of the latest snapshot
//! - add / set-default / delete / override: mutate and publish a new version

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, OverrideCommand};
pub use errors::{CliError, CliResult};

use tracing_subscriber::EnvFilter;

/// Parse arguments, set up logging and dispatch the command.
pub fn run() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    commands::dispatch(&cli)
}
