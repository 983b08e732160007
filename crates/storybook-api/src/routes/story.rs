//! Page navigation routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Serialize;
use storybook_session::command::SessionCommand;
use storybook_session::session::SessionStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// Acknowledgment that a command was queued for the next tick.
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: &'static str,
}

fn queue(
    state: &AppState,
    command: SessionCommand,
    name: &'static str,
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    state.session.send(command)?;
    Ok((StatusCode::ACCEPTED, Json(QueuedResponse { queued: name })))
}

/// POST /next
async fn next_page(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    queue(&state, SessionCommand::NextPage, "next_page")
}

/// POST /back
async fn previous_page(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    queue(&state, SessionCommand::PreviousPage, "previous_page")
}

/// POST /page/{index}
async fn go_to_page(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    queue(&state, SessionCommand::GoToPage(index), "go_to_page")
}

/// POST /clear
async fn clear_page(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    queue(&state, SessionCommand::ClearPage, "clear_page")
}

/// GET /status
async fn status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(*state.status.borrow())
}

/// Returns the router for page navigation.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/next", post(next_page))
        .route("/back", post(previous_page))
        .route("/page/{index}", post(go_to_page))
        .route("/clear", post(clear_page))
        .route("/status", get(status))
}
