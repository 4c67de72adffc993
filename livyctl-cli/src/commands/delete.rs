//! Delete session command.

use crate::cli::SessionTarget;
use crate::error::CliError;
use crate::util::{GlobalOptions, open_session};

/// Delete session command handler
pub fn cmd_delete(opts: &GlobalOptions<'_>, target: &SessionTarget) -> Result<(), CliError> {
    let mut session = open_session(opts, target)?;
    session.delete()?;
    println!("Deleted session {}", session.id());
    Ok(())
}
