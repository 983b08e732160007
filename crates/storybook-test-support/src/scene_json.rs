//! Page-file JSON builders.
//!
//! Produce page source strings in the wire format (camelCase field names) so
//! tests across the workspace can assemble scenes without hand-writing JSON.

use serde_json::{Value, json};

/// Builder for one page file.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    image: String,
    is_title_page: bool,
    text: String,
    timestamps: Vec<Value>,
    audio: Option<String>,
    scene_objects: Vec<Value>,
    triggers: Vec<Value>,
}

impl PageBuilder {
    #[must_use]
    pub fn new(image: &str) -> Self {
        Self {
            image: image.to_owned(),
            is_title_page: false,
            text: String::new(),
            timestamps: Vec::new(),
            audio: None,
            scene_objects: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Sets the page text with uniform word timing: word `i` spans
    /// `[start + i * step, start + (i + 1) * step)` seconds.
    #[must_use]
    pub fn narrated_text(mut self, text: &str, start: f64, step: f64) -> Self {
        self.timestamps = text
            .split_whitespace()
            .enumerate()
            .map(|(index, _)| {
                let word_start = start + index as f64 * step;
                json!({ "start": word_start, "end": word_start + step })
            })
            .collect();
        self.text = text.to_owned();
        self
    }

    #[must_use]
    pub fn title_page(mut self) -> Self {
        self.is_title_page = true;
        self
    }

    #[must_use]
    pub fn audio(mut self, asset: &str) -> Self {
        self.audio = Some(asset.to_owned());
        self
    }

    #[must_use]
    pub fn hotspot(mut self, label: &str, asset: &str, left: f32, top: f32, width: f32, height: f32) -> Self {
        self.scene_objects.push(json!({
            "label": label,
            "asset": asset,
            "position": { "left": left, "top": top, "width": width, "height": height }
        }));
        self
    }

    /// A click trigger with the default highlight effect.
    #[must_use]
    pub fn click_trigger(mut self, word_index: usize, hotspot_label: &str) -> Self {
        self.triggers.push(json!({
            "textId": word_index,
            "sceneObjectLabel": hotspot_label
        }));
        self
    }

    /// A click trigger with an explicit action value in wire format.
    #[must_use]
    pub fn click_trigger_with_action(
        mut self,
        word_index: usize,
        hotspot_label: &str,
        action: Value,
    ) -> Self {
        self.triggers.push(json!({
            "textId": word_index,
            "sceneObjectLabel": hotspot_label,
            "action": action
        }));
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        let mut page = json!({
            "storyImageFile": self.image,
            "isTitlePage": self.is_title_page,
            "text": self.text,
            "timestamps": self.timestamps,
            "sceneObjects": self.scene_objects,
            "triggers": self.triggers,
        });
        if let Some(audio) = self.audio {
            page["audioFile"] = json!(audio);
        }
        page.to_string()
    }
}
