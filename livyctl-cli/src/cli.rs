//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Run code in Apache Livy interactive sessions
#[derive(Parser)]
#[command(name = "livyctl")]
#[command(author, version, about = "Run code in Apache Livy interactive sessions")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Livy endpoint URL, overriding the configuration file
    #[arg(short, long, global = true, env = "LIVYCTL_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Session language (scala or python), overriding the configuration file
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write log events to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run code in a new session and delete it afterwards
    #[command(about = "Start a session, run code in it, and delete it")]
    Run {
        #[command(flatten)]
        source: CodeSource,

        /// Create the SQL context before running the code
        #[arg(long)]
        sql_context: bool,

        /// Keep the session and print its snapshot instead of deleting it
        #[arg(long)]
        keep: bool,

        /// Stop waiting for the statement after this many seconds
        #[arg(long, value_name = "SECS")]
        statement_timeout: Option<f64>,
    },

    /// Start a session and wait until it is idle
    #[command(about = "Start a session and print its id")]
    Start {
        /// Create the SQL context once the session is idle
        #[arg(long)]
        sql_context: bool,

        /// Write the session snapshot to this file
        #[arg(long, value_name = "PATH")]
        save: Option<PathBuf>,
    },

    /// Run code in an existing session
    #[command(about = "Run code in an existing session")]
    Exec {
        #[command(flatten)]
        target: SessionTarget,

        #[command(flatten)]
        source: CodeSource,
    },

    /// Print the state of an existing session
    #[command(about = "Print the current state of a session")]
    State {
        #[command(flatten)]
        target: SessionTarget,
    },

    /// Delete an existing session
    #[command(about = "Delete a session")]
    Delete {
        #[command(flatten)]
        target: SessionTarget,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Existing session selected by id or by a saved snapshot
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SessionTarget {
    /// Id of the session on the server
    #[arg(long)]
    pub id: Option<u64>,

    /// Snapshot file written by `start --save` or `run --keep`
    #[arg(long, value_name = "PATH")]
    pub session: Option<PathBuf>,
}

/// Code given inline, from a file, or on standard input
#[derive(Args, Debug, Clone)]
pub struct CodeSource {
    /// Code to run; read from standard input when omitted
    #[arg(conflicts_with = "file")]
    pub code: Option<String>,

    /// File holding the code to run
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}
