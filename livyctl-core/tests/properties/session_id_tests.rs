//! Property tests for session id string forms

use livyctl_core::models::NOT_STARTED_ID;
use livyctl_core::SessionId;
use proptest::prelude::*;

proptest! {
    /// Property: Assigned ids survive their string form
    #[test]
    fn assigned_ids_round_trip(id in any::<u64>()) {
        let session_id = SessionId::Assigned(id);
        prop_assert_eq!(session_id.to_string(), id.to_string());
        prop_assert_eq!(session_id.to_string().parse::<SessionId>().unwrap(), session_id);
        prop_assert_eq!(session_id.assigned(), Some(id));
    }

    /// Property: Non-numeric text is never an id
    #[test]
    fn non_numeric_text_is_rejected(text in "[a-z]{1,8}") {
        prop_assert!(text.parse::<SessionId>().is_err());
    }
}

#[test]
fn sentinel_parses_to_not_started() {
    let id: SessionId = NOT_STARTED_ID.parse().unwrap();
    assert!(id.is_not_started());
    assert_eq!(id.assigned(), None);
    assert_eq!(SessionId::default(), SessionId::NotStarted);
}
