//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use storybook_core::display::Orientation;
use storybook_core::error::StoryError;
use storybook_core::geometry::Size;
use storybook_core::probe::ImageProbe;
use storybook_scene::description::SceneDescription;
use storybook_session::library::SceneSource;
use storybook_session::session::{Session, SessionConfig};
use storybook_test_support::scene_json::PageBuilder;
use storybook_test_support::{
    AudioControl, FixedImageProbe, RecordingRenderer, RenderControl, ScriptedAudioPlayer,
    ScriptedInput,
};

use storybook_api::routes;
use storybook_api::state::AppState;

/// In-memory story source, one JSON page per entry.
pub struct InMemoryStory {
    pages: Vec<String>,
}

impl SceneSource for InMemoryStory {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(
        &self,
        index: usize,
        orientation: Orientation,
        probe: &dyn ImageProbe,
    ) -> Result<SceneDescription, StoryError> {
        let source = self.pages.get(index).ok_or(StoryError::PageOutOfRange {
            requested: index,
            page_count: self.pages.len(),
        })?;
        SceneDescription::from_json(source, orientation, probe)
    }
}

/// A real engine over deterministic fakes, ticked manually from tests.
pub struct TestEngine {
    pub session: Session,
    pub render: RenderControl,
    pub audio: AudioControl,
}

pub fn page(image: &str, text: &str) -> String {
    PageBuilder::new(image)
        .narrated_text(text, 0.5, 0.5)
        .audio(&format!("{image}_audio"))
        .build()
}

pub fn engine_with_pages(pages: Vec<String>, autoplay: bool) -> TestEngine {
    let (renderer, render) = RecordingRenderer::new();
    let (player, audio) = ScriptedAudioPlayer::new();
    let (input_source, _input) = ScriptedInput::new();
    let session = Session::new(
        Box::new(renderer),
        Box::new(player),
        Box::new(input_source),
        Box::new(FixedImageProbe::new(Size::new(1600.0, 900.0))),
        Box::new(InMemoryStory { pages }),
        SessionConfig {
            orientation: Orientation::Landscape,
            autoplay,
        },
    );
    TestEngine {
        session,
        render,
        audio,
    }
}

/// Build the full app router over a live session. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(session: &Session) -> Router {
    let app_state = AppState::new(session.handle(), session.status_feed());
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/story", routes::story::router())
        .nest("/api/v1/audio", routes::audio::router())
        .with_state(app_state)
}

/// Send a bodyless POST request and return the response.
pub async fn post(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
