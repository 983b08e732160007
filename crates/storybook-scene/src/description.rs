//! Validated page model.

use std::collections::HashSet;

use storybook_core::display::{DisplayMode, Orientation};
use storybook_core::error::StoryError;
use storybook_core::geometry::{Color, Point, Rect, Size};
use storybook_core::probe::ImageProbe;
use storybook_core::timecode::{TimeRange, Timecode};

use crate::raw::{RawAction, RawCondition, RawScene};

/// A clickable/interactive region overlaid on the page image, in
/// source-image pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    /// Unique within the page (first registration wins on collision).
    pub label: String,
    /// Sprite to draw for the hotspot; `None` for an invisible region.
    pub asset: Option<String>,
    pub bounds: Rect,
}

/// What causes a trigger to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Click,
}

/// A visual mutation applicable to an element — applied immediately during
/// page setup, or stored on a handler chain and applied later on a click or
/// an audio boundary. One representation serves both uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Highlight(Color),
    MoveTo(Point),
    Resize(Size),
}

/// A declared condition→effect binding: when the word at `word_index` fires
/// its condition, apply `effect` to the hotspot named `hotspot_label`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub condition: ConditionKind,
    pub word_index: usize,
    pub hotspot_label: String,
    pub effect: Effect,
}

/// One story page, immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub display_mode: DisplayMode,
    pub is_title_page: bool,
    /// Background art reference, resolved by the rendering collaborator.
    pub background_image: String,
    /// Whitespace-split words of the page text, empty tokens dropped.
    pub words: Vec<String>,
    /// Narration span per word; always the same length as `words`.
    pub timings: Vec<TimeRange>,
    /// Narration clip reference, if the page has audio.
    pub audio: Option<String>,
    pub hotspots: Vec<Hotspot>,
    pub triggers: Vec<Trigger>,
}

impl SceneDescription {
    /// Parses and validates one page file.
    ///
    /// The display mode is taken from the file when present; otherwise it is
    /// derived from the device orientation and the background image's native
    /// aspect ratio. An unprobeable image is not fatal — the page falls back
    /// to the plain layout for the orientation and a warning is logged.
    ///
    /// # Errors
    ///
    /// - [`StoryError::MalformedDescription`] for invalid JSON, a word/timing
    ///   count mismatch, or an inverted time range.
    /// - [`StoryError::DanglingReference`] for a trigger citing an unknown
    ///   word index or hotspot label.
    pub fn from_json(
        source: &str,
        orientation: Orientation,
        probe: &dyn ImageProbe,
    ) -> Result<Self, StoryError> {
        let raw: RawScene = serde_json::from_str(source)
            .map_err(|e| StoryError::MalformedDescription(e.to_string()))?;

        let words: Vec<String> = raw.text.split_whitespace().map(str::to_owned).collect();

        if raw.timestamps.len() != words.len() {
            return Err(StoryError::MalformedDescription(format!(
                "{} words but {} timestamps",
                words.len(),
                raw.timestamps.len()
            )));
        }

        let mut timings = Vec::with_capacity(raw.timestamps.len());
        for (index, stamp) in raw.timestamps.iter().enumerate() {
            if stamp.end < stamp.start {
                return Err(StoryError::MalformedDescription(format!(
                    "timestamp {index} ends before it starts ({} > {})",
                    stamp.start, stamp.end
                )));
            }
            timings.push(TimeRange::new(
                Timecode::from_secs_f64(stamp.start),
                Timecode::from_secs_f64(stamp.end),
            ));
        }

        let display_mode = raw.display_mode.unwrap_or_else(|| {
            let aspect = match probe.image_size(&raw.story_image_file) {
                Some(size) => size.aspect_ratio(),
                None => {
                    tracing::warn!(
                        image = %raw.story_image_file,
                        "background image not probeable, assuming plain layout"
                    );
                    0.0
                }
            };
            DisplayMode::for_image(orientation, aspect)
        });

        let hotspots: Vec<Hotspot> = raw
            .scene_objects
            .into_iter()
            .map(|object| Hotspot {
                label: object.label,
                asset: if object.asset.is_empty() {
                    None
                } else {
                    Some(object.asset)
                },
                bounds: Rect::new(
                    object.position.left,
                    object.position.top,
                    object.position.width,
                    object.position.height,
                ),
            })
            .collect();

        let labels: HashSet<&str> = hotspots.iter().map(|h| h.label.as_str()).collect();

        let mut triggers = Vec::with_capacity(raw.triggers.len());
        for (index, trigger) in raw.triggers.into_iter().enumerate() {
            let word_index = usize::try_from(trigger.text_id).ok();
            let word_index = match word_index.filter(|&id| id < words.len()) {
                Some(id) => id,
                None => {
                    return Err(StoryError::DanglingReference {
                        trigger_index: index,
                        reference: format!("word index {}", trigger.text_id),
                    });
                }
            };
            if !labels.contains(trigger.scene_object_label.as_str()) {
                return Err(StoryError::DanglingReference {
                    trigger_index: index,
                    reference: format!("hotspot label {:?}", trigger.scene_object_label),
                });
            }
            triggers.push(Trigger {
                condition: match trigger.condition {
                    RawCondition::Click => ConditionKind::Click,
                },
                word_index,
                hotspot_label: trigger.scene_object_label,
                effect: trigger.action.map_or(Effect::Highlight(Color::HIGHLIGHT), resolve_action),
            });
        }

        Ok(Self {
            display_mode,
            is_title_page: raw.is_title_page,
            background_image: raw.story_image_file,
            words,
            timings,
            audio: raw.audio_file,
            hotspots,
            triggers,
        })
    }
}

fn resolve_action(action: RawAction) -> Effect {
    match action {
        RawAction::Highlight { r, g, b, alpha } => {
            // Alpha 0 means "not specified" in the original content, not
            // transparent.
            let alpha = alpha.filter(|&a| a > 0).unwrap_or(255);
            Effect::Highlight(Color::rgba(r, g, b, alpha))
        }
        RawAction::Move { x, y } => Effect::MoveTo(Point::new(x, y)),
        RawAction::ChangeSize { width, height } => Effect::Resize(Size::new(width, height)),
    }
}
