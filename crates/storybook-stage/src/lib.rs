//! Storybook — page composition.
//!
//! [`composer::PageComposer`] turns a validated scene description into live
//! page state: the fitted background, one interactive element per word packed
//! into stanzas, hotspot elements mapped from image pixel space, and the
//! declared word→hotspot trigger wiring. It owns every per-page element and
//! tears the whole page down on clear.

pub mod composer;
pub mod element;
pub mod swipe;
