//! Scripted audio player — deterministic `AudioPlayer` for tests.
//!
//! Tests drive the reported position and playing flag through the paired
//! [`AudioControl`] handle, and assert on the transport calls the engine
//! made.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use storybook_core::audio::AudioPlayer;
use storybook_core::error::StoryError;
use storybook_core::timecode::Timecode;

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCall {
    Load(String),
    Play,
    Pause,
    Stop,
    SeekTo(Timecode),
}

#[derive(Debug, Default)]
struct AudioState {
    position: Timecode,
    playing: bool,
    loaded: Option<String>,
    missing_assets: HashSet<String>,
    calls: Vec<AudioCall>,
}

/// The player half: handed to the engine as `Box<dyn AudioPlayer>`.
#[derive(Debug)]
pub struct ScriptedAudioPlayer {
    state: Arc<Mutex<AudioState>>,
}

/// The test half: scripts positions and inspects recorded calls.
#[derive(Debug, Clone)]
pub struct AudioControl {
    state: Arc<Mutex<AudioState>>,
}

impl ScriptedAudioPlayer {
    #[must_use]
    pub fn new() -> (Self, AudioControl) {
        let state = Arc::new(Mutex::new(AudioState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            AudioControl { state },
        )
    }
}

impl AudioPlayer for ScriptedAudioPlayer {
    fn load(&mut self, asset: &str) -> Result<(), StoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(AudioCall::Load(asset.to_owned()));
        if state.missing_assets.contains(asset) {
            return Err(StoryError::AssetMissing(asset.to_owned()));
        }
        state.loaded = Some(asset.to_owned());
        Ok(())
    }

    fn play(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(AudioCall::Play);
        state.playing = true;
    }

    fn pause(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(AudioCall::Pause);
        state.playing = false;
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(AudioCall::Stop);
        state.playing = false;
        state.position = Timecode::ZERO;
    }

    fn seek_to(&mut self, position: Timecode) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(AudioCall::SeekTo(position));
        state.position = position;
    }

    fn position(&self) -> Timecode {
        self.state.lock().unwrap().position
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }
}

impl AudioControl {
    /// Scripts the position the player reports on the next tick.
    pub fn set_position(&self, position: Timecode) {
        self.state.lock().unwrap().position = position;
    }

    /// Scripts the playing flag, e.g. to simulate a clip finishing on its
    /// own.
    pub fn set_playing(&self, playing: bool) {
        self.state.lock().unwrap().playing = playing;
    }

    /// Marks an asset as unresolvable, so `load` fails with `AssetMissing`.
    pub fn add_missing_asset(&self, asset: &str) {
        self.state
            .lock()
            .unwrap()
            .missing_assets
            .insert(asset.to_owned());
    }

    #[must_use]
    pub fn calls(&self) -> Vec<AudioCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// The most recently loaded clip, if any load succeeded.
    #[must_use]
    pub fn loaded_clip(&self) -> Option<String> {
        self.state.lock().unwrap().loaded.clone()
    }
}
