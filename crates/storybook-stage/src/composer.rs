//! Page composition and teardown.

use std::collections::HashMap;

use storybook_core::geometry::{Color, Point, Size};
use storybook_core::input::InputEvent;
use storybook_core::probe::ImageProbe;
use storybook_core::render::{ElementHandle, Panel, Renderer};
use storybook_layout::stanza::{LayoutConfig, StanzaBuilder};
use storybook_scene::description::{Effect, SceneDescription};
use storybook_timeline::timeline::{AudioTimeline, FirePolicy};

use crate::element::{Boundary, BoundaryAction, ClickHandler, Element, ElementId};
use crate::swipe::{StanzaRegion, detect_swipe};

/// Vertical pitch of one stanza row in the text panel.
pub const STANZA_HEIGHT: f32 = 120.0;

#[derive(Debug)]
struct LoadedPage {
    background: Option<ElementHandle>,
    words: Vec<Element>,
    hotspots: Vec<Element>,
    stanza_regions: Vec<StanzaRegion>,
    pointer_down: Option<Point>,
    has_audio: bool,
}

/// Instantiates a page's elements from its description, wires triggers, and
/// owns everything until the page is cleared.
pub struct PageComposer {
    renderer: Box<dyn Renderer>,
    autoplay: bool,
    page: Option<LoadedPage>,
}

impl PageComposer {
    #[must_use]
    pub fn new(renderer: Box<dyn Renderer>, autoplay: bool) -> Self {
        Self {
            renderer,
            autoplay,
            page: None,
        }
    }

    #[must_use]
    pub fn has_page(&self) -> bool {
        self.page.is_some()
    }

    /// Render handle of the word at `index`, if a page is loaded.
    #[must_use]
    pub fn word_handle(&self, index: usize) -> Option<ElementHandle> {
        self.page
            .as_ref()
            .and_then(|page| page.words.get(index))
            .map(|element| element.handle)
    }

    /// Render handle of the hotspot at `index` (page order, duplicates
    /// skipped), if a page is loaded.
    #[must_use]
    pub fn hotspot_handle(&self, index: usize) -> Option<ElementHandle> {
        self.page
            .as_ref()
            .and_then(|page| page.hotspots.get(index))
            .map(|element| element.handle)
    }

    /// Replaces the current page with `description`.
    ///
    /// The previous page (if any) is torn down first. Asset failures degrade:
    /// a missing background, sprite, or narration clip is logged and skipped
    /// while the rest of the page loads normally.
    pub fn load_page(
        &mut self,
        description: &SceneDescription,
        probe: &dyn ImageProbe,
        timeline: &mut AudioTimeline<BoundaryAction>,
    ) {
        self.clear_page(timeline);
        self.renderer.set_display_mode(description.display_mode);

        if description.is_title_page {
            self.load_title_page(description, probe, timeline);
            return;
        }

        let graphics_panel = self.renderer.panel_size(Panel::Graphics);
        let native = probe.image_size(&description.background_image);
        // Without a probeable image, treat the art as filling the panel so
        // hotspot mapping degenerates to the identity.
        let (image_offset, image_scale) = match native {
            Some(native) => fit_into(graphics_panel, native),
            None => {
                tracing::warn!(
                    image = %description.background_image,
                    "background image not probeable, hotspots map unscaled"
                );
                (Point::default(), 1.0)
            }
        };

        let background = self.place_background(description, Panel::Graphics, image_offset, image_scale, native, graphics_panel);

        let (words, stanza_regions) = self.place_words(description, timeline);
        let hotspots = self.place_hotspots(description, image_offset, image_scale);

        let mut page = LoadedPage {
            background,
            words,
            hotspots,
            stanza_regions,
            pointer_down: None,
            has_audio: false,
        };

        wire_triggers(description, &mut page);

        if let Some(audio) = &description.audio {
            match timeline.load_clip(audio) {
                Ok(()) => page.has_audio = true,
                Err(error) => tracing::warn!(%error, "narration clip unavailable"),
            }
        }

        let autoplay = self.autoplay && page.has_audio;
        self.page = Some(page);

        if autoplay {
            timeline.play_full();
        }
        tracing::info!(image = %description.background_image, "page loaded");
    }

    /// Destroys every per-page element and resets the timeline. Safe to call
    /// with nothing loaded, and safe to call twice.
    pub fn clear_page(&mut self, timeline: &mut AudioTimeline<BoundaryAction>) {
        if let Some(page) = self.page.take() {
            if let Some(background) = page.background {
                self.renderer.destroy_element(background);
            }
            for element in &page.words {
                self.renderer.destroy_element(element.handle);
            }
            for element in &page.hotspots {
                self.renderer.destroy_element(element.handle);
            }
        }
        timeline.clear_and_reset();
    }

    /// Feeds one pointer event through click chains and swipe detection.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
        timeline: &mut AudioTimeline<BoundaryAction>,
    ) {
        match event {
            InputEvent::ElementClicked(handle) => self.run_click_chain(handle),
            InputEvent::PointerDown(point) => {
                if let Some(page) = &mut self.page {
                    page.pointer_down = Some(point);
                }
            }
            InputEvent::PointerUp(up) => {
                let Some(page) = &mut self.page else { return };
                let Some(down) = page.pointer_down.take() else {
                    return;
                };
                if let Some(index) = detect_swipe(&page.stanza_regions, down, up) {
                    let range = page.stanza_regions[index].time_range;
                    tracing::debug!(stanza = index, "swipe replay");
                    timeline.play_interval(range);
                }
            }
        }
    }

    /// Applies a fired word-boundary action: highlight on enter, revert on
    /// exit.
    pub fn apply_boundary(&mut self, action: BoundaryAction) {
        let Some(page) = &self.page else { return };
        let Some(word) = page.words.get(action.word_index) else {
            return;
        };
        let color = match action.boundary {
            Boundary::Enter => Color::HIGHLIGHT,
            Boundary::Exit => word.base_color,
        };
        self.renderer.set_color(word.handle, color);
    }

    fn load_title_page(
        &mut self,
        description: &SceneDescription,
        probe: &dyn ImageProbe,
        timeline: &mut AudioTimeline<BoundaryAction>,
    ) {
        let panel = self.renderer.panel_size(Panel::Title);
        let native = probe.image_size(&description.background_image);
        let background =
            self.place_background(description, Panel::Title, Point::default(), 1.0, native, panel);

        let mut has_audio = false;
        if let Some(audio) = &description.audio {
            match timeline.load_clip(audio) {
                Ok(()) => has_audio = true,
                Err(error) => tracing::warn!(%error, "narration clip unavailable"),
            }
        }

        self.page = Some(LoadedPage {
            background,
            words: Vec::new(),
            hotspots: Vec::new(),
            stanza_regions: Vec::new(),
            pointer_down: None,
            has_audio,
        });
        tracing::info!(image = %description.background_image, "title page loaded");
    }

    fn place_background(
        &mut self,
        description: &SceneDescription,
        panel: Panel,
        offset: Point,
        scale: f32,
        native: Option<Size>,
        panel_size: Size,
    ) -> Option<ElementHandle> {
        let handle = self.renderer.create_element(panel);
        if let Err(error) = self
            .renderer
            .set_texture(handle, &description.background_image)
        {
            tracing::warn!(%error, "page loads without background art");
            self.renderer.destroy_element(handle);
            return None;
        }
        let placed_size = native.map_or(panel_size, |native| {
            Size::new(native.width * scale, native.height * scale)
        });
        self.renderer.set_position(handle, offset);
        self.renderer.set_size(handle, placed_size);
        Some(handle)
    }

    fn place_words(
        &mut self,
        description: &SceneDescription,
        timeline: &mut AudioTimeline<BoundaryAction>,
    ) -> (Vec<Element>, Vec<StanzaRegion>) {
        let text_panel = self.renderer.panel_size(Panel::Text);
        let mut builder = StanzaBuilder::new(LayoutConfig::new(text_panel.width));
        let mut words = Vec::with_capacity(description.words.len());

        for (index, word) in description.words.iter().enumerate() {
            let timing = description.timings[index];
            let measured = self.renderer.measure_text_width(word);
            let placement = builder.push_word(word, measured, timing);

            let handle = self.renderer.create_element(Panel::Text);
            self.renderer.set_text(handle, word);
            self.renderer.set_color(handle, Color::TEXT);
            self.renderer.set_position(
                handle,
                Point::new(placement.x, placement.stanza_index as f32 * STANZA_HEIGHT),
            );
            self.renderer
                .set_size(handle, Size::new(placement.width, STANZA_HEIGHT));

            timeline.register(
                timing.start,
                FirePolicy::OnlyBeforeStop,
                BoundaryAction {
                    word_index: index,
                    boundary: Boundary::Enter,
                },
            );
            timeline.register(
                timing.end,
                FirePolicy::Always,
                BoundaryAction {
                    word_index: index,
                    boundary: Boundary::Exit,
                },
            );

            words.push(Element::new(handle, Color::TEXT));
        }

        let stanza_regions = builder
            .finish()
            .into_iter()
            .enumerate()
            .map(|(index, stanza)| StanzaRegion {
                band_top: index as f32 * STANZA_HEIGHT,
                band_bottom: (index + 1) as f32 * STANZA_HEIGHT,
                left_edge: 0.0,
                time_range: stanza.time_range,
            })
            .collect();

        (words, stanza_regions)
    }

    fn place_hotspots(
        &mut self,
        description: &SceneDescription,
        image_offset: Point,
        image_scale: f32,
    ) -> Vec<Element> {
        let mut hotspots: Vec<Element> = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for hotspot in &description.hotspots {
            if seen.contains_key(hotspot.label.as_str()) {
                tracing::warn!(label = %hotspot.label, "duplicate hotspot label ignored");
                continue;
            }

            let bounds = hotspot.bounds.mapped(image_offset, image_scale);
            let handle = self.renderer.create_element(Panel::Graphics);
            self.renderer.set_position(handle, bounds.origin());
            self.renderer.set_size(handle, bounds.size());
            if let Some(asset) = &hotspot.asset {
                if let Err(error) = self.renderer.set_texture(handle, asset) {
                    tracing::warn!(%error, label = %hotspot.label, "hotspot loads without sprite");
                }
            }

            let index = hotspots.len();
            let mut element = Element::new(handle, Color::TEXT);
            // Clicking a hotspot highlights it, independent of any declared
            // trigger.
            element.add_click_handler(ElementId::Hotspot(index), Effect::Highlight(Color::HIGHLIGHT));
            seen.insert(hotspot.label.as_str(), index);
            hotspots.push(element);
        }

        hotspots
    }

    fn run_click_chain(&mut self, handle: ElementHandle) {
        let Some(page) = &self.page else { return };
        let chain: Vec<ClickHandler> = page
            .words
            .iter()
            .chain(page.hotspots.iter())
            .find(|element| element.handle == handle)
            .map(|element| element.click_handlers.clone())
            .unwrap_or_default();
        for handler in chain {
            self.apply_effect(handler.target, handler.effect);
        }
    }

    fn apply_effect(&mut self, target: ElementId, effect: Effect) {
        let Some(page) = &self.page else { return };
        let handle = match target {
            ElementId::Word(index) => page.words.get(index).map(|element| element.handle),
            ElementId::Hotspot(index) => page.hotspots.get(index).map(|element| element.handle),
        };
        let Some(handle) = handle else { return };
        match effect {
            Effect::Highlight(color) => self.renderer.set_color(handle, color),
            Effect::MoveTo(position) => self.renderer.set_position(handle, position),
            Effect::Resize(size) => self.renderer.set_size(handle, size),
        }
    }
}

/// Resolves each declared trigger onto its word element's click chain,
/// parameterized by the target hotspot. First-wins label resolution matches
/// the hotspot arena built in `place_hotspots`.
fn wire_triggers(description: &SceneDescription, page: &mut LoadedPage) {
    let mut labels: HashMap<&str, usize> = HashMap::new();
    let mut next = 0;
    for hotspot in &description.hotspots {
        if !labels.contains_key(hotspot.label.as_str()) {
            labels.insert(hotspot.label.as_str(), next);
            next += 1;
        }
    }

    for trigger in &description.triggers {
        let Some(&hotspot_index) = labels.get(trigger.hotspot_label.as_str()) else {
            // Unreachable for validated descriptions.
            continue;
        };
        if let Some(word) = page.words.get_mut(trigger.word_index) {
            word.add_click_handler(ElementId::Hotspot(hotspot_index), trigger.effect);
        }
    }
}

/// Aspect-preserving fit of `native` into `panel`: constrained by width when
/// the image is proportionally wider than the panel, by height otherwise.
/// Returns the top-left offset of the placed image and the uniform scale
/// factor mapping image pixels to panel units.
fn fit_into(panel: Size, native: Size) -> (Point, f32) {
    if native.width <= 0.0 || native.height <= 0.0 {
        return (Point::default(), 1.0);
    }
    let scale = if native.aspect_ratio() >= panel.aspect_ratio() {
        panel.width / native.width
    } else {
        panel.height / native.height
    };
    let offset = Point::new(
        (panel.width - native.width * scale) / 2.0,
        (panel.height - native.height * scale) / 2.0,
    );
    (offset, scale)
}
