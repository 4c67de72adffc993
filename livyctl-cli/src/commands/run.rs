//! One-shot run command: start, execute, delete.

use std::io::Write;
use std::time::Duration;

use livyctl_core::{CancellationToken, LivySession, StatementOutput};

use super::start::prepare;
use crate::cli::CodeSource;
use crate::error::CliError;
use crate::util::{
    GlobalOptions, discard, fresh_session, load_settings, read_code, snapshot_json, start_session,
};

/// Parameters for the run command
pub struct RunParams<'a> {
    /// Where the code comes from
    pub source: &'a CodeSource,
    /// Create the SQL context before running
    pub sql_context: bool,
    /// Keep the session instead of deleting it
    pub keep: bool,
    /// Seconds to wait for the statement
    pub statement_timeout: Option<f64>,
}

/// Run command handler
pub fn cmd_run(opts: &GlobalOptions<'_>, params: &RunParams<'_>) -> Result<(), CliError> {
    let code = read_code(params.source)?;
    let cancel = params
        .statement_timeout
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map(CancellationToken::with_timeout)
                .map_err(|_| {
                    CliError::Config(format!(
                        "statement timeout must be a non-negative number of seconds, got {secs}"
                    ))
                })
        })
        .transpose()?;

    let settings = load_settings(opts)?;
    let mut session = fresh_session(&settings)?;
    start_session(&mut session)?;

    run_in_session(
        &mut session,
        &code,
        params,
        cancel.as_ref(),
        &mut std::io::stdout().lock(),
    )
}

/// Runs code in a started session and writes what the user should see to
/// `out`
///
/// Statement output is written before the session is deleted. With `keep`
/// the snapshot is written even when the code could not be run, so the
/// session can still be reached.
fn run_in_session(
    session: &mut LivySession,
    code: &str,
    params: &RunParams<'_>,
    cancel: Option<&CancellationToken>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let outcome = execute(session, code, params.sql_context, cancel);

    if params.keep {
        if let Ok(ref output) = outcome {
            writeln!(out, "{}", output.text())?;
        }
        writeln!(out, "{}", snapshot_json(session)?)?;
        return outcome.and_then(finish);
    }

    match outcome {
        Ok(output) => {
            writeln!(out, "{}", output.text())?;
            session.delete()?;
            finish(output)
        }
        Err(e) => {
            discard(session);
            Err(e)
        }
    }
}

fn execute(
    session: &mut LivySession,
    code: &str,
    sql_context: bool,
    cancel: Option<&CancellationToken>,
) -> Result<StatementOutput, CliError> {
    prepare(session, sql_context)?;
    Ok(session.execute_statement(code, cancel)?)
}

fn finish(output: StatementOutput) -> Result<(), CliError> {
    if output.is_error() {
        return Err(CliError::Remote(output.into_text()));
    }
    Ok(())
}
