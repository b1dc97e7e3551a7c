//! Frame (row) bookkeeping for the page table display.
//!
//! Each resident page occupies one frame numbered `1..=capacity`. Frames are
//! handed out in order while the cache fills up; after that a new page
//! always lands in the frame of the page it evicted.

use crate::Page;
use std::collections::HashMap;

/// Frames reserved up front; larger tables grow on demand.
const MAX_PREALLOCATED_FRAMES: usize = 1024;

/// Maps resident pages to the frame they occupy.
#[derive(Debug, Clone)]
pub struct FrameTable {
    capacity: usize,
    rows: HashMap<Page, usize>,
}

impl FrameTable {
    /// Create an empty table with `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rows: HashMap::with_capacity(capacity.min(MAX_PREALLOCATED_FRAMES)),
        }
    }

    /// Place `page` in a frame and return the frame number.
    ///
    /// When `evicted` is set, that page gives up its frame to `page`.
    /// Returns `None` when the table has no frames at all.
    pub fn assign(&mut self, page: Page, evicted: Option<Page>) -> Option<usize> {
        if self.capacity == 0 {
            return None;
        }

        let reused = evicted.and_then(|old| self.rows.remove(&old));
        let row = match reused {
            Some(row) => row,
            None => self.next_free_row()?,
        };

        self.rows.insert(page, row);
        Some(row)
    }

    /// Frame currently holding `page`.
    pub fn row_of(&self, page: Page) -> Option<usize> {
        self.rows.get(&page).copied()
    }

    /// Number of occupied frames.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lowest frame number that nobody occupies.
    fn next_free_row(&self) -> Option<usize> {
        (1..=self.capacity).find(|row| !self.rows.values().any(|used| used == row))
    }
}
