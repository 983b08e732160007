//! Shared application state.

use storybook_session::session::{SessionHandle, SessionStatus};
use tokio::sync::watch;

/// Application state shared across all request handlers: the command
/// producer and the status snapshot feed, both safe to clone per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub status: watch::Receiver<SessionStatus>,
}

impl AppState {
    #[must_use]
    pub fn new(session: SessionHandle, status: watch::Receiver<SessionStatus>) -> Self {
        Self { session, status }
    }
}
