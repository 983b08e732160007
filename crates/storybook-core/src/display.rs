//! Display modes and screen orientation.

use serde::{Deserialize, Serialize};

/// Physical orientation of the device, reported by the embedding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Layout target for a page. Related to [`Orientation`] but also selects
/// which panel arrangement the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    Landscape,
    LandscapeWide,
    Portrait,
}

/// Image aspect ratio above which a landscape page switches to the wide
/// layout (graphics spanning the full width, text below).
pub const WIDE_ASPECT_THRESHOLD: f32 = 2.0;

impl DisplayMode {
    /// Selects the layout for a page whose description does not pin one
    /// explicitly, from the device orientation and the background image's
    /// native aspect ratio.
    #[must_use]
    pub fn for_image(orientation: Orientation, aspect_ratio: f32) -> Self {
        match orientation {
            Orientation::Landscape => {
                if aspect_ratio > WIDE_ASPECT_THRESHOLD {
                    Self::LandscapeWide
                } else {
                    Self::Landscape
                }
            }
            Orientation::Portrait => Self::Portrait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_image_wider_than_threshold_is_wide() {
        assert_eq!(
            DisplayMode::for_image(Orientation::Landscape, 2.4),
            DisplayMode::LandscapeWide
        );
    }

    #[test]
    fn test_landscape_image_at_threshold_is_plain_landscape() {
        assert_eq!(
            DisplayMode::for_image(Orientation::Landscape, 2.0),
            DisplayMode::Landscape
        );
    }

    #[test]
    fn test_portrait_orientation_ignores_aspect() {
        assert_eq!(
            DisplayMode::for_image(Orientation::Portrait, 3.0),
            DisplayMode::Portrait
        );
    }
}
