//! Engine error types.

use thiserror::Error;

/// Top-level error type for page loading, navigation, and asset resolution.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A page description is structurally invalid (missing fields, word and
    /// timing counts that disagree, an inverted time range). Fatal at load:
    /// the page is not shown and the previous page stays visible.
    #[error("malformed scene description: {0}")]
    MalformedDescription(String),

    /// A trigger references a word index or hotspot label that does not
    /// exist on the page. Fatal at load.
    #[error("trigger {trigger_index} references unknown {reference}")]
    DanglingReference {
        /// Index of the offending trigger in the page's trigger list.
        trigger_index: usize,
        /// Human-readable description of the missing referent.
        reference: String,
    },

    /// An image, sprite, or audio asset could not be resolved. Non-fatal at
    /// page scope: the page loads without the asset and a warning is logged.
    #[error("asset not found: {0}")]
    AssetMissing(String),

    /// A navigation command asked for a page the story does not have.
    #[error("page {requested} out of range (story has {page_count} pages)")]
    PageOutOfRange {
        /// The requested zero-based page index.
        requested: usize,
        /// Number of pages in the open story.
        page_count: usize,
    },

    /// An I/O failure while reading story files.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
