//! `livyctl` - Command-line interface for Apache Livy sessions
//!
//! Provides commands for starting sessions, running code in them, checking
//! their state and deleting them.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use livyctl_core::{TracingConfig, TracingLevel, TracingOutput, init_tracing};
use util::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let mut tracing_config =
        TracingConfig::new().with_level(TracingLevel::from_verbosity(cli.verbose, cli.quiet));
    if let Some(ref path) = cli.log_file {
        tracing_config = tracing_config.with_output(TracingOutput::File { path: path.clone() });
    }
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: {e}");
    }

    let opts = GlobalOptions {
        config: cli.config.as_deref(),
        endpoint: cli.endpoint.as_deref(),
        language: cli.language.as_deref(),
    };
    let result = commands::dispatch(&opts, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
