//! Session state command.

use crate::cli::SessionTarget;
use crate::error::CliError;
use crate::util::{GlobalOptions, open_session};

/// Print the state the server reports for a session
pub fn cmd_state(opts: &GlobalOptions<'_>, target: &SessionTarget) -> Result<(), CliError> {
    let mut session = open_session(opts, target)?;
    let state = session.state()?;
    println!("{state}");
    Ok(())
}
