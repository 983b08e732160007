//! Per-page interactive elements.

use storybook_core::geometry::Color;
use storybook_core::render::ElementHandle;
use storybook_scene::description::Effect;

/// Identifies an element within the current page's arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementId {
    Word(usize),
    Hotspot(usize),
}

/// Which side of a word's narration span was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Enter,
    Exit,
}

/// Timeline action payload: the narration crossed a word boundary. The
/// composer applies it by highlighting (enter) or reverting (exit) the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryAction {
    pub word_index: usize,
    pub boundary: Boundary,
}

/// One entry of an element's click chain: apply `effect` to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickHandler {
    pub target: ElementId,
    pub effect: Effect,
}

/// A live interactive element. Visual state lives in the renderer; the
/// element keeps its handle, the color to revert to, and its ordered click
/// chain.
#[derive(Debug)]
pub(crate) struct Element {
    pub handle: ElementHandle,
    pub base_color: Color,
    pub click_handlers: Vec<ClickHandler>,
}

impl Element {
    pub fn new(handle: ElementHandle, base_color: Color) -> Self {
        Self {
            handle,
            base_color,
            click_handlers: Vec::new(),
        }
    }

    /// Appends to the click chain. Handlers accumulate and all fire on
    /// click, in registration order.
    pub fn add_click_handler(&mut self, target: ElementId, effect: Effect) {
        self.click_handlers.push(ClickHandler { target, effect });
    }
}
