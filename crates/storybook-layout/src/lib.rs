//! Storybook — stanza packing.
//!
//! Converts the page's word sequence plus measured word widths into stanzas
//! (visual rows), each tagged with the narration range spanning its first
//! word's start to its last word's end. Packing is greedy and fully
//! deterministic: identical input always yields identical stanzas.

pub mod stanza;
