//! Shared test fakes and builders for the storybook player engine.

mod audio;
mod input;
mod probe;
mod render;
pub mod scene_json;

pub use audio::{AudioCall, AudioControl, ScriptedAudioPlayer};
pub use input::{InputControl, ScriptedInput};
pub use probe::FixedImageProbe;
pub use render::{RecordingRenderer, RenderCall, RenderControl};
