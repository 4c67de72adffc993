//! Start session command.

use std::path::Path;

use livyctl_core::{LivySession, SessionState};

use crate::error::CliError;
use crate::util::{
    GlobalOptions, discard, fresh_session, load_settings, start_session, write_snapshot,
};

/// Start command handler
///
/// The session is deleted again if it never becomes usable.
pub fn cmd_start(
    opts: &GlobalOptions<'_>,
    sql_context: bool,
    save: Option<&Path>,
) -> Result<(), CliError> {
    let settings = load_settings(opts)?;
    let mut session = fresh_session(&settings)?;
    start_session(&mut session)?;

    if let Err(e) = prepare(&mut session, sql_context) {
        discard(&mut session);
        return Err(e);
    }

    if let Some(path) = save {
        write_snapshot(path, &session)?;
    }
    println!("{}", session.id());
    Ok(())
}

/// Waits for a started session to become idle and optionally binds the SQL
/// context
pub fn prepare(session: &mut LivySession, sql_context: bool) -> Result<(), CliError> {
    let timeout = session.timings().sql_context_timeout;
    session.wait_for_state(SessionState::Idle, timeout)?;
    if sql_context {
        session.create_sql_context()?;
    }
    Ok(())
}
