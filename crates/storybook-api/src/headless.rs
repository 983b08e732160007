//! Headless collaborators for running the engine without a display.
//!
//! The remote-control binary drives the real engine with these: a renderer
//! that narrates its operations to the log, an audio transport whose position
//! advances with wall time, and an input source that never reports events.
//! Useful for driving the player from a controller during development and for
//! soak-testing stories.

use std::time::Instant;

use storybook_core::audio::AudioPlayer;
use storybook_core::display::DisplayMode;
use storybook_core::error::StoryError;
use storybook_core::geometry::{Color, Point, Size};
use storybook_core::input::{InputEvent, InputSource};
use storybook_core::probe::ImageProbe;
use storybook_core::render::{ElementHandle, Panel, Renderer};
use storybook_core::timecode::Timecode;

/// Renderer that logs operations instead of drawing.
#[derive(Debug, Default)]
pub struct LogRenderer {
    next_handle: u64,
}

impl Renderer for LogRenderer {
    fn set_display_mode(&mut self, mode: DisplayMode) {
        tracing::debug!(?mode, "display mode");
    }

    fn panel_size(&self, panel: Panel) -> Size {
        match panel {
            Panel::Graphics => Size::new(1920.0, 1080.0),
            Panel::Text => Size::new(2240.0, 480.0),
            Panel::Title => Size::new(2560.0, 1600.0),
        }
    }

    fn create_element(&mut self, panel: Panel) -> ElementHandle {
        self.next_handle += 1;
        let handle = ElementHandle(self.next_handle);
        tracing::debug!(?panel, ?handle, "create element");
        handle
    }

    fn set_texture(&mut self, element: ElementHandle, asset: &str) -> Result<(), StoryError> {
        tracing::debug!(?element, asset, "set texture");
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * 40.0
    }

    fn set_text(&mut self, element: ElementHandle, text: &str) {
        tracing::debug!(?element, text, "set text");
    }

    fn set_color(&mut self, element: ElementHandle, color: Color) {
        tracing::debug!(?element, ?color, "set color");
    }

    fn set_position(&mut self, element: ElementHandle, position: Point) {
        tracing::debug!(?element, ?position, "set position");
    }

    fn set_size(&mut self, element: ElementHandle, size: Size) {
        tracing::debug!(?element, ?size, "set size");
    }

    fn destroy_element(&mut self, element: ElementHandle) {
        tracing::debug!(?element, "destroy element");
    }
}

/// Audio transport whose position advances with wall time while playing. No
/// sound is produced and clips never end on their own.
#[derive(Debug, Default)]
pub struct WallClockAudio {
    base: u64,
    playing_since: Option<Instant>,
}

impl WallClockAudio {
    fn current_millis(&self) -> u64 {
        let elapsed = self
            .playing_since
            .map_or(0, |since| since.elapsed().as_millis() as u64);
        self.base + elapsed
    }
}

impl AudioPlayer for WallClockAudio {
    fn load(&mut self, asset: &str) -> Result<(), StoryError> {
        tracing::debug!(asset, "load clip");
        self.base = 0;
        self.playing_since = None;
        Ok(())
    }

    fn play(&mut self) {
        if self.playing_since.is_none() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.base = self.current_millis();
        self.playing_since = None;
    }

    fn stop(&mut self) {
        self.base = 0;
        self.playing_since = None;
    }

    fn seek_to(&mut self, position: Timecode) {
        self.base = position.as_millis();
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn position(&self) -> Timecode {
        Timecode::from_millis(self.current_millis())
    }

    fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }
}

/// Input source that never reports events.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        None
    }
}

/// Probe with no asset pipeline behind it; pages fall back to the plain
/// layout for the orientation.
#[derive(Debug, Default)]
pub struct NoProbe;

impl ImageProbe for NoProbe {
    fn image_size(&self, _asset: &str) -> Option<Size> {
        None
    }
}
