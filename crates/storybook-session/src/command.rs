//! Commands accepted by the session queue.

/// The engine entry points exposed to external controllers. Producers on any
/// thread enqueue these; the logic thread executes them in FIFO order, one
/// drain per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Load the page after the current one (the first page if none is
    /// loaded).
    NextPage,
    /// Load the page before the current one. Ignored on the first page.
    PreviousPage,
    /// Load a specific zero-based page.
    GoToPage(usize),
    /// Tear the current page down without loading another.
    ClearPage,
    /// Pause if narrating, otherwise play.
    ToggleAudio,
    /// Stop narration and rewind.
    StopAudio,
}
