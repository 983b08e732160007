//! Storybook — page description model.
//!
//! One [`description::SceneDescription`] fully describes one story page:
//! background art, word-by-word narration timing, interactive hotspots, and
//! the triggers wiring words to hotspot effects. Descriptions are parsed from
//! the page source JSON, validated once, and held read-only for the page's
//! lifetime.

pub mod description;
mod raw;
