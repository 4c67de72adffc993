//! Core value types shared by the session controller and its collaborators.

mod language;
mod session_id;
mod state;

pub use language::Language;
pub use session_id::{NOT_STARTED_ID, SessionId};
pub use state::SessionState;
