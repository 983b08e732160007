//! Wire representation of a page file.
//!
//! Field names match the original page assets (camelCase, `storyImageFile`,
//! `sceneObjects`, `textId`, ...) so existing story content deserializes
//! unchanged. Everything here is converted into the validated model in
//! [`crate::description`] and never escapes this crate.

use serde::Deserialize;
use storybook_core::display::DisplayMode;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawScene {
    pub display_mode: Option<DisplayMode>,
    #[serde(default)]
    pub is_title_page: bool,
    pub story_image_file: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamps: Vec<RawTimestamp>,
    pub audio_file: Option<String>,
    #[serde(default)]
    pub scene_objects: Vec<RawSceneObject>,
    #[serde(default)]
    pub triggers: Vec<RawTrigger>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTimestamp {
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSceneObject {
    pub label: String,
    /// Empty means the hotspot is an invisible clickable region.
    #[serde(default)]
    pub asset: String,
    pub position: RawPosition,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPosition {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTrigger {
    pub text_id: i64,
    pub scene_object_label: String,
    #[serde(default)]
    pub condition: RawCondition,
    pub action: Option<RawAction>,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) enum RawCondition {
    #[default]
    Click,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum RawAction {
    Highlight {
        r: u8,
        g: u8,
        b: u8,
        /// 0 or absent both mean fully opaque, matching the original
        /// content's convention.
        alpha: Option<u8>,
    },
    Move {
        x: f32,
        y: f32,
    },
    ChangeSize {
        width: f32,
        height: f32,
    },
}
