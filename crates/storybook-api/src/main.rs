//! Storybook remote-control server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use storybook_api::headless::{LogRenderer, NoInput, NoProbe, WallClockAudio};
use storybook_api::{routes, state::AppState};
use storybook_session::library::StoryLibrary;
use storybook_session::session::{Session, SessionConfig};

/// Engine frame rate for the headless tick loop.
const TICK_INTERVAL: Duration = Duration::from_millis(33);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting storybook remote-control server");

    // Read configuration from environment.
    let story_dir = std::env::var("STORY_DIR")
        .map_err(|_| "STORY_DIR environment variable must be set")?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;

    // Open the story and build the engine with headless collaborators.
    let library = StoryLibrary::open(&story_dir)?;
    let config = SessionConfig {
        autoplay: library.manifest().autoplay,
        ..SessionConfig::default()
    };
    let mut session = Session::new(
        Box::new(LogRenderer::default()),
        Box::new(WallClockAudio::default()),
        Box::new(NoInput),
        Box::new(NoProbe),
        Box::new(library),
        config,
    );

    let app_state = AppState::new(session.handle(), session.status_feed());

    // The engine runs on its own logic thread at a fixed tick rate; the
    // HTTP surface only feeds its command queue.
    std::thread::spawn(move || {
        loop {
            session.tick();
            std::thread::sleep(TICK_INTERVAL);
        }
    });

    // Build router.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/story", routes::story::router())
        .nest("/api/v1/audio", routes::audio::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
