//! Narration transport routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use storybook_session::command::SessionCommand;

use crate::error::ApiError;
use crate::routes::story::QueuedResponse;
use crate::state::AppState;

/// POST /toggle
async fn toggle(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    state.session.send(SessionCommand::ToggleAudio)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(QueuedResponse {
            queued: "toggle_audio",
        }),
    ))
}

/// POST /stop
async fn stop(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    state.session.send(SessionCommand::StopAudio)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(QueuedResponse {
            queued: "stop_audio",
        }),
    ))
}

/// Returns the router for the narration transport.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(toggle))
        .route("/stop", post(stop))
}
