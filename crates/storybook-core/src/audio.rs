//! Audio playback collaborator port.

use crate::error::StoryError;
use crate::timecode::Timecode;

/// Transport and position access for the page's narration clip. Decoding and
/// output are the embedder's concern; the engine only steers the transport
/// and samples `position` once per tick.
pub trait AudioPlayer: Send {
    /// Loads the narration clip for the current page.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::AssetMissing`] if the clip cannot be resolved;
    /// callers degrade rather than abort.
    fn load(&mut self, asset: &str) -> Result<(), StoryError>;

    fn play(&mut self);

    /// Pauses in a way that allows resuming from the same position.
    fn pause(&mut self);

    /// Stops playback and rewinds the clip to its beginning.
    fn stop(&mut self);

    fn seek_to(&mut self, position: Timecode);

    /// Current playback offset into the loaded clip.
    fn position(&self) -> Timecode;

    fn is_playing(&self) -> bool;
}
