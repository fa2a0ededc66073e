//! Application state: the parsed transcript, row geometry, and scroll
//! position.

pub mod row_index;
pub mod scroll_handler;

pub use row_index::RowIndex;
pub use scroll_handler::handle_scroll_action;

use crate::model::{ChatEntry, Role};

/// Lines a row occupies beyond its text: one header line plus one blank
/// separator line.
pub const ROW_CHROME_LINES: usize = 2;

/// State for a loaded transcript.
///
/// Owns the entries, their cumulative geometry, and the scroll position.
/// Rendering and the pinned-preview engine both read geometry from here;
/// only scroll handling and viewport resizes write to it.
#[derive(Debug, Clone)]
pub struct AppState {
    entries: Vec<ChatEntry>,
    rows: RowIndex,
    scroll_offset: usize,
    viewport_lines: usize,
    /// Index of the most recent user entry, if any.
    latest_request: Option<usize>,
}

impl AppState {
    /// Build state from parsed entries.
    pub fn new(entries: Vec<ChatEntry>) -> Self {
        let mut rows = RowIndex::with_capacity(entries.len());
        let mut latest_request = None;
        for (i, entry) in entries.iter().enumerate() {
            rows.push(row_height(entry));
            if entry.role() == Role::User {
                latest_request = Some(i);
            }
        }

        Self {
            entries,
            rows,
            scroll_offset: 0,
            viewport_lines: 0,
            latest_request,
        }
    }

    /// All transcript entries in order.
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Entry at `index`, if present.
    pub fn entry(&self, index: usize) -> Option<&ChatEntry> {
        self.entries.get(index)
    }

    /// Row geometry index.
    pub fn rows(&self) -> &RowIndex {
        &self.rows
    }

    /// Current scroll offset in lines from the top of the transcript.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Set the scroll offset, clamped to the valid range.
    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset.min(self.max_scroll_offset());
    }

    /// Height of the transcript viewport in lines.
    pub fn viewport_lines(&self) -> usize {
        self.viewport_lines
    }

    /// Record the transcript viewport height. Re-clamps the scroll offset,
    /// since growing the viewport can shrink the scrollable range.
    pub fn set_viewport_lines(&mut self, lines: usize) {
        self.viewport_lines = lines;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }

    /// Largest valid scroll offset for the current viewport.
    pub fn max_scroll_offset(&self) -> usize {
        self.rows.total().saturating_sub(self.viewport_lines)
    }

    /// Index of the most recent user entry, if any.
    pub fn latest_request(&self) -> Option<usize> {
        self.latest_request
    }

    /// Geometry of the most recent user entry: `(entry index, top line,
    /// height in lines)`.
    pub fn latest_request_geometry(&self) -> Option<(usize, usize, usize)> {
        let index = self.latest_request?;
        Some((index, self.rows.top_of(index), self.rows.height_of(index)))
    }
}

/// Height of an entry's row in lines: header, text, separator.
pub fn row_height(entry: &ChatEntry) -> usize {
    entry.text_line_count() + ROW_CHROME_LINES
}
