//! Screen-space geometry primitives.
//!
//! Positions and sizes are in the rendering collaborator's units (pixels for
//! the reference tablet layout). Hotspot bounds arrive in source-image pixel
//! space and are mapped into panel space by the composer.

use serde::{Deserialize, Serialize};

/// A 2D position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2D extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height; zero for degenerate sizes.
    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }
}

/// An axis-aligned rectangle described the way the page source format does:
/// left/top corner plus extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn origin(self) -> Point {
        Point {
            x: self.left,
            y: self.top,
        }
    }

    #[must_use]
    pub const fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Maps a source-image pixel rectangle into panel space given the
    /// background placement: `panel = offset + pixel * scale`.
    #[must_use]
    pub fn mapped(self, offset: Point, scale: f32) -> Self {
        Self {
            left: offset.x + self.left * scale,
            top: offset.y + self.top * scale,
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}

/// An RGBA color, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Default text color for words not being narrated.
    pub const TEXT: Self = Self::rgb(255, 255, 255);

    /// Highlight color applied while a word is being narrated or clicked.
    pub const HIGHLIGHT: Self = Self::rgb(255, 160, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}
