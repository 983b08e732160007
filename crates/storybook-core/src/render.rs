//! Rendering collaborator port.
//!
//! The engine never draws anything itself. It creates abstract elements in
//! named panels, mutates their visual state, and destroys them on page
//! teardown; the embedding renderer owns the actual widget tree.

use crate::display::DisplayMode;
use crate::error::StoryError;
use crate::geometry::{Color, Point, Size};

/// Opaque handle to a visual element owned by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// The regions a page composes into. Which physical panel each maps to
/// depends on the active [`DisplayMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Background art and hotspot sprites.
    Graphics,
    /// Word elements, stacked into stanzas.
    Text,
    /// Title-page region; holds only the background image.
    Title,
}

/// Operations the engine needs from the rendering toolkit.
pub trait Renderer: Send {
    /// Switches the panel arrangement. Called once per page load, before any
    /// element is created.
    fn set_display_mode(&mut self, mode: DisplayMode);

    /// Size of a panel under the current display mode.
    fn panel_size(&self, panel: Panel) -> Size;

    /// Creates an empty element parented to the given panel.
    fn create_element(&mut self, panel: Panel) -> ElementHandle;

    /// Assigns an image asset to an element.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::AssetMissing`] if the asset cannot be resolved;
    /// callers degrade rather than abort.
    fn set_texture(&mut self, element: ElementHandle, asset: &str) -> Result<(), StoryError>;

    /// Preferred rendered width of a word in the text style.
    fn measure_text_width(&self, text: &str) -> f32;

    fn set_text(&mut self, element: ElementHandle, text: &str);

    fn set_color(&mut self, element: ElementHandle, color: Color);

    fn set_position(&mut self, element: ElementHandle, position: Point);

    fn set_size(&mut self, element: ElementHandle, size: Size);

    fn destroy_element(&mut self, element: ElementHandle);
}
