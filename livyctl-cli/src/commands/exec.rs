//! Run code in an existing session.

use crate::cli::{CodeSource, SessionTarget};
use crate::error::CliError;
use crate::util::{GlobalOptions, open_session, read_code};

/// Exec command handler
///
/// Prints the statement output. A remote evaluation error is printed too and
/// then reported through the exit code.
pub fn cmd_exec(
    opts: &GlobalOptions<'_>,
    target: &SessionTarget,
    source: &CodeSource,
) -> Result<(), CliError> {
    let code = read_code(source)?;
    let session = open_session(opts, target)?;

    let output = session.execute_statement(&code, None)?;
    println!("{}", output.text());
    if output.is_error() {
        return Err(CliError::Remote(output.into_text()));
    }
    Ok(())
}
