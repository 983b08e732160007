//! Storybook — remote-control HTTP surface.
//!
//! A thin axum layer over the session command queue: handlers translate
//! requests into [`storybook_session::command::SessionCommand`]s and read the
//! per-tick status snapshot. The engine itself runs on its own logic thread;
//! nothing here touches it directly.

pub mod error;
pub mod headless;
pub mod routes;
pub mod state;
