//! Recording renderer — deterministic `Renderer` for tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use storybook_core::display::DisplayMode;
use storybook_core::error::StoryError;
use storybook_core::geometry::{Color, Point, Size};
use storybook_core::render::{ElementHandle, Panel, Renderer};

/// Default character advance used for scripted text measurement.
const DEFAULT_CHAR_WIDTH: f32 = 40.0;

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    SetDisplayMode(DisplayMode),
    CreateElement {
        handle: ElementHandle,
        panel: Panel,
    },
    SetTexture {
        element: ElementHandle,
        asset: String,
    },
    SetText {
        element: ElementHandle,
        text: String,
    },
    SetColor {
        element: ElementHandle,
        color: Color,
    },
    SetPosition {
        element: ElementHandle,
        position: Point,
    },
    SetSize {
        element: ElementHandle,
        size: Size,
    },
    DestroyElement(ElementHandle),
}

#[derive(Debug)]
struct RenderState {
    panel_sizes: HashMap<&'static str, Size>,
    char_width: f32,
    missing_assets: HashSet<String>,
    next_handle: u64,
    live: HashSet<ElementHandle>,
    colors: HashMap<ElementHandle, Color>,
    positions: HashMap<ElementHandle, Point>,
    sizes: HashMap<ElementHandle, Size>,
    calls: Vec<RenderCall>,
}

fn panel_key(panel: Panel) -> &'static str {
    match panel {
        Panel::Graphics => "graphics",
        Panel::Text => "text",
        Panel::Title => "title",
    }
}

impl Default for RenderState {
    fn default() -> Self {
        let mut panel_sizes = HashMap::new();
        panel_sizes.insert(panel_key(Panel::Graphics), Size::new(1600.0, 900.0));
        panel_sizes.insert(panel_key(Panel::Text), Size::new(2240.0, 480.0));
        panel_sizes.insert(panel_key(Panel::Title), Size::new(1600.0, 1200.0));
        Self {
            panel_sizes,
            char_width: DEFAULT_CHAR_WIDTH,
            missing_assets: HashSet::new(),
            next_handle: 1,
            live: HashSet::new(),
            colors: HashMap::new(),
            positions: HashMap::new(),
            sizes: HashMap::new(),
            calls: Vec::new(),
        }
    }
}

/// The renderer half: handed to the engine as `Box<dyn Renderer>`.
#[derive(Debug)]
pub struct RecordingRenderer {
    state: Arc<Mutex<RenderState>>,
}

/// The test half: scripts panel sizes/measurements and inspects state.
#[derive(Debug, Clone)]
pub struct RenderControl {
    state: Arc<Mutex<RenderState>>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> (Self, RenderControl) {
        let state = Arc::new(Mutex::new(RenderState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            RenderControl { state },
        )
    }
}

impl Renderer for RecordingRenderer {
    fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(RenderCall::SetDisplayMode(mode));
    }

    fn panel_size(&self, panel: Panel) -> Size {
        self.state.lock().unwrap().panel_sizes[panel_key(panel)]
    }

    fn create_element(&mut self, panel: Panel) -> ElementHandle {
        let mut state = self.state.lock().unwrap();
        let handle = ElementHandle(state.next_handle);
        state.next_handle += 1;
        state.live.insert(handle);
        state.calls.push(RenderCall::CreateElement { handle, panel });
        handle
    }

    fn set_texture(&mut self, element: ElementHandle, asset: &str) -> Result<(), StoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RenderCall::SetTexture {
            element,
            asset: asset.to_owned(),
        });
        if state.missing_assets.contains(asset) {
            return Err(StoryError::AssetMissing(asset.to_owned()));
        }
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> f32 {
        let state = self.state.lock().unwrap();
        text.chars().count() as f32 * state.char_width
    }

    fn set_text(&mut self, element: ElementHandle, text: &str) {
        self.state.lock().unwrap().calls.push(RenderCall::SetText {
            element,
            text: text.to_owned(),
        });
    }

    fn set_color(&mut self, element: ElementHandle, color: Color) {
        let mut state = self.state.lock().unwrap();
        state.colors.insert(element, color);
        state.calls.push(RenderCall::SetColor { element, color });
    }

    fn set_position(&mut self, element: ElementHandle, position: Point) {
        let mut state = self.state.lock().unwrap();
        state.positions.insert(element, position);
        state
            .calls
            .push(RenderCall::SetPosition { element, position });
    }

    fn set_size(&mut self, element: ElementHandle, size: Size) {
        let mut state = self.state.lock().unwrap();
        state.sizes.insert(element, size);
        state.calls.push(RenderCall::SetSize { element, size });
    }

    fn destroy_element(&mut self, element: ElementHandle) {
        let mut state = self.state.lock().unwrap();
        state.live.remove(&element);
        state.calls.push(RenderCall::DestroyElement(element));
    }
}

impl RenderControl {
    pub fn set_panel_size(&self, panel: Panel, size: Size) {
        self.state
            .lock()
            .unwrap()
            .panel_sizes
            .insert(panel_key(panel), size);
    }

    /// Marks an asset as unresolvable, so `set_texture` fails with
    /// `AssetMissing`.
    pub fn add_missing_asset(&self, asset: &str) {
        self.state
            .lock()
            .unwrap()
            .missing_assets
            .insert(asset.to_owned());
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RenderCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Handles created and not yet destroyed.
    #[must_use]
    pub fn live_elements(&self) -> Vec<ElementHandle> {
        let mut live: Vec<ElementHandle> = self.state.lock().unwrap().live.iter().copied().collect();
        live.sort_by_key(|handle| handle.0);
        live
    }

    #[must_use]
    pub fn color_of(&self, element: ElementHandle) -> Option<Color> {
        self.state.lock().unwrap().colors.get(&element).copied()
    }

    #[must_use]
    pub fn position_of(&self, element: ElementHandle) -> Option<Point> {
        self.state.lock().unwrap().positions.get(&element).copied()
    }

    #[must_use]
    pub fn size_of(&self, element: ElementHandle) -> Option<Size> {
        self.state.lock().unwrap().sizes.get(&element).copied()
    }
}
