//! Fixed image probe.

use storybook_core::geometry::Size;
use storybook_core::probe::ImageProbe;

/// An `ImageProbe` that reports the same size for every asset, or nothing at
/// all.
#[derive(Debug, Clone, Copy)]
pub struct FixedImageProbe {
    size: Option<Size>,
}

impl FixedImageProbe {
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self { size: Some(size) }
    }

    /// A probe that resolves no asset.
    #[must_use]
    pub const fn missing() -> Self {
        Self { size: None }
    }
}

impl ImageProbe for FixedImageProbe {
    fn image_size(&self, _asset: &str) -> Option<Size> {
        self.size
    }
}
