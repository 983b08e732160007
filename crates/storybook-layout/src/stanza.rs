//! Greedy word-wrap into stanzas.

use std::ops::Range;

use storybook_core::timecode::{TimeRange, Timecode};

/// Default gap between adjacent words in a stanza.
pub const WORD_SPACING: f32 = 20.0;

/// Legibility floor: a word element never renders narrower than this, even
/// when its measured text width is smaller.
pub const MIN_WORD_WIDTH: f32 = 120.0;

/// Punctuation that closes a stanza: a word ending in any of these is the
/// last word of its row.
const STANZA_ENDING_PUNCTUATION: [char; 5] = [';', '.', '?', '"', '!'];

/// Returns true if `word` should be the last word of its stanza.
#[must_use]
pub fn word_ends_stanza(word: &str) -> bool {
    word.ends_with(STANZA_ENDING_PUNCTUATION)
}

/// Packing parameters for one page.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// Usable stanza width, from the active text panel.
    pub line_capacity: f32,
    pub word_spacing: f32,
    pub min_word_width: f32,
}

impl LayoutConfig {
    #[must_use]
    pub const fn new(line_capacity: f32) -> Self {
        Self {
            line_capacity,
            word_spacing: WORD_SPACING,
            min_word_width: MIN_WORD_WIDTH,
        }
    }
}

/// Where one word landed: its stanza and its x offset within it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordPlacement {
    pub stanza_index: usize,
    pub x: f32,
    /// Width actually reserved (measured width or the legibility floor).
    pub width: f32,
}

/// One packed row of words with its derived narration range.
#[derive(Debug, Clone, PartialEq)]
pub struct Stanza {
    /// Global word indices belonging to this stanza.
    pub words: Range<usize>,
    /// First word's start through last word's end.
    pub time_range: TimeRange,
    /// Total occupied width including inter-word spacing.
    pub width: f32,
}

#[derive(Debug)]
struct OpenStanza {
    first_word: usize,
    word_count: usize,
    first_start: Timecode,
    last_end: Timecode,
    used: f32,
}

/// Incremental stanza packer. The composer feeds words in page order as it
/// creates their elements; [`StanzaBuilder::finish`] yields the closed
/// stanzas.
#[derive(Debug)]
pub struct StanzaBuilder {
    config: LayoutConfig,
    stanzas: Vec<Stanza>,
    current: Option<OpenStanza>,
    next_word_index: usize,
    break_before_next: bool,
}

impl StanzaBuilder {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            stanzas: Vec::new(),
            current: None,
            next_word_index: 0,
            break_before_next: false,
        }
    }

    /// Places the next word. A word joins the current stanza when it fits in
    /// the remaining capacity (spacing included) and the previous word did
    /// not end a sentence or phrase; otherwise it opens a new stanza. A
    /// single word wider than the whole capacity sits alone on its own row.
    pub fn push_word(&mut self, text: &str, preferred_width: f32, timing: TimeRange) -> WordPlacement {
        let width = preferred_width.max(self.config.min_word_width);
        let spacing = self.config.word_spacing;
        let capacity = self.config.line_capacity;
        let word_index = self.next_word_index;
        self.next_word_index += 1;

        let joined_at = match &mut self.current {
            Some(open)
                if !self.break_before_next && open.used + spacing + width <= capacity =>
            {
                let x = open.used + spacing;
                open.used = x + width;
                open.word_count += 1;
                open.last_end = timing.end;
                Some(x)
            }
            _ => None,
        };

        let x = match joined_at {
            Some(x) => x,
            None => {
                self.close_current();
                self.current = Some(OpenStanza {
                    first_word: word_index,
                    word_count: 1,
                    first_start: timing.start,
                    last_end: timing.end,
                    used: width,
                });
                0.0
            }
        };

        self.break_before_next = word_ends_stanza(text);
        // The open stanza's index is the number of closed stanzas before it.
        WordPlacement {
            stanza_index: self.stanzas.len(),
            x,
            width,
        }
    }

    /// Closes the in-progress stanza and returns all stanzas in page order.
    #[must_use]
    pub fn finish(mut self) -> Vec<Stanza> {
        self.close_current();
        self.stanzas
    }

    fn close_current(&mut self) {
        if let Some(open) = self.current.take() {
            self.stanzas.push(Stanza {
                words: open.first_word..open.first_word + open.word_count,
                time_range: TimeRange::new(open.first_start, open.last_end),
                width: open.used,
            });
        }
    }
}
