use dioxus::prelude::*;

use corkboard_common::account::Session;

use super::browser_store::accounts;

/// Who is signed in, shared by every component on the page.
///
/// Read once from storage at startup; login and logout update both storage
/// and this context, so the account menu and every shoutbox re-render from
/// the same value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
}

impl SessionState {
    pub fn load() -> Self {
        let session = match accounts().and_then(|a| a.current_session()) {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("failed to read session: {e}");
                None
            }
        };
        if let Some(s) = &session {
            tracing::info!("restored session for {}", s.username);
        }
        Self { session }
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

pub fn use_session_state() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}
