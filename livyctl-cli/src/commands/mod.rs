//! Command handler modules for the CLI.

mod completions;
mod delete;
mod exec;
mod run;
mod start;
mod state;

use crate::cli::Commands;
use crate::error::CliError;
use crate::util::GlobalOptions;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(opts: &GlobalOptions<'_>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run {
            source,
            sql_context,
            keep,
            statement_timeout,
        } => run::cmd_run(
            opts,
            &run::RunParams {
                source: &source,
                sql_context,
                keep,
                statement_timeout,
            },
        ),
        Commands::Start { sql_context, save } => {
            start::cmd_start(opts, sql_context, save.as_deref())
        }
        Commands::Exec { target, source } => exec::cmd_exec(opts, &target, &source),
        Commands::State { target } => state::cmd_state(opts, &target),
        Commands::Delete { target } => delete::cmd_delete(opts, &target),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
