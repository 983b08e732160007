//! Storybook — the audio-timeline trigger scheduler.
//!
//! [`timeline::AudioTimeline`] owns the narration transport and a table of
//! timestamped actions. As the external player's position advances (or
//! jumps), the timeline decides which registered actions are due and returns
//! them to the caller in firing order; it never executes domain effects
//! itself.

pub mod timeline;
