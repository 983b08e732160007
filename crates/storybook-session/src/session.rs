//! The single-threaded engine tick.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

use storybook_core::audio::AudioPlayer;
use storybook_core::display::Orientation;
use storybook_core::error::StoryError;
use storybook_core::input::InputSource;
use storybook_core::probe::ImageProbe;
use storybook_core::render::Renderer;
use storybook_stage::composer::PageComposer;
use storybook_stage::element::BoundaryAction;
use storybook_timeline::timeline::{AudioTimeline, Transport};

use crate::command::SessionCommand;
use crate::library::SceneSource;

/// The session's command channel has no live receiver; the engine has shut
/// down.
#[derive(Debug, Error)]
#[error("session command channel closed")]
pub struct SessionClosed;

/// Cloneable producer side of the session command queue. Safe to share with
/// any thread (remote-control handlers, shell UI callbacks).
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Enqueues a command for the next tick.
    ///
    /// # Errors
    ///
    /// [`SessionClosed`] if the session has been dropped.
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionClosed> {
        self.sender.send(command).map_err(|_| SessionClosed)
    }
}

/// Snapshot of the session published after every tick, for status queries
/// from outside the logic thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub current_page: Option<usize>,
    pub page_count: usize,
    pub narrating: bool,
}

/// Session construction parameters.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub orientation: Orientation,
    /// Start narration automatically on page load.
    pub autoplay: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Landscape,
            autoplay: true,
        }
    }
}

/// Owns the whole engine and pumps it from `tick()`, one call per frame:
/// drain queued commands, poll input, advance the audio timeline, apply the
/// fired word boundaries.
pub struct Session {
    composer: PageComposer,
    timeline: AudioTimeline<BoundaryAction>,
    input: Box<dyn InputSource>,
    probe: Box<dyn ImageProbe>,
    source: Box<dyn SceneSource>,
    orientation: Orientation,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    sender: mpsc::UnboundedSender<SessionCommand>,
    status: watch::Sender<SessionStatus>,
    current_page: Option<usize>,
}

impl Session {
    #[must_use]
    pub fn new(
        renderer: Box<dyn Renderer>,
        player: Box<dyn AudioPlayer>,
        input: Box<dyn InputSource>,
        probe: Box<dyn ImageProbe>,
        source: Box<dyn SceneSource>,
        config: SessionConfig,
    ) -> Self {
        let (sender, commands) = mpsc::unbounded_channel();
        let (status, _) = watch::channel(SessionStatus {
            current_page: None,
            page_count: source.page_count(),
            narrating: false,
        });
        Self {
            composer: PageComposer::new(renderer, config.autoplay),
            timeline: AudioTimeline::new(player),
            input,
            probe,
            source,
            orientation: config.orientation,
            commands,
            sender,
            status,
            current_page: None,
        }
    }

    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            sender: self.sender.clone(),
        }
    }

    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.current_page
    }

    /// Subscribes to the per-tick status snapshot.
    #[must_use]
    pub fn status_feed(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// One frame of work. A queued command that fails is logged and does not
    /// abort the drain; later commands in the same tick still run.
    pub fn tick(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            if let Err(error) = self.execute(command) {
                tracing::error!(?command, %error, "queued command failed");
            }
        }

        while let Some(event) = self.input.poll_event() {
            self.composer.handle_input(event, &mut self.timeline);
        }

        for action in self.timeline.advance() {
            self.composer.apply_boundary(action);
        }

        self.status.send_replace(SessionStatus {
            current_page: self.current_page,
            page_count: self.source.page_count(),
            narrating: self.timeline.transport() == Transport::Playing,
        });
    }

    fn execute(&mut self, command: SessionCommand) -> Result<(), StoryError> {
        match command {
            SessionCommand::NextPage => {
                let target = self.current_page.map_or(0, |index| index + 1);
                self.go_to_page(target)
            }
            SessionCommand::PreviousPage => {
                match self.current_page.and_then(|index| index.checked_sub(1)) {
                    Some(target) => self.go_to_page(target),
                    // Already at the front; nothing to go back to.
                    None => Ok(()),
                }
            }
            SessionCommand::GoToPage(index) => self.go_to_page(index),
            SessionCommand::ClearPage => {
                self.composer.clear_page(&mut self.timeline);
                self.current_page = None;
                Ok(())
            }
            SessionCommand::ToggleAudio => {
                self.timeline.toggle();
                Ok(())
            }
            SessionCommand::StopAudio => {
                self.timeline.stop();
                Ok(())
            }
        }
    }

    /// Loads a page by index. The description is read and validated before
    /// the current page is touched, so a failed load leaves the previous
    /// page visible.
    fn go_to_page(&mut self, index: usize) -> Result<(), StoryError> {
        let description = self.source.load_page(index, self.orientation, &*self.probe)?;
        self.composer
            .load_page(&description, &*self.probe, &mut self.timeline);
        self.current_page = Some(index);
        Ok(())
    }
}
