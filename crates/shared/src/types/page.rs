//! Page windows for offset-paged source queries.
//!
//! The remote tabular source caps how many rows a single call may return,
//! so callers walk the table in fixed-size windows at increasing offsets.

use serde::{Deserialize, Serialize};

/// One fixed-size window into an offset-paged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum number of rows to return.
    pub limit: u64,
}

impl PageWindow {
    /// Creates the first window of a paged walk.
    #[must_use]
    pub const fn first(limit: u64) -> Self {
        Self { offset: 0, limit }
    }

    /// Returns the window immediately following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }

    /// Returns true if a page of `returned` rows is the last page of the
    /// walk (the source returned fewer rows than the window allows).
    #[must_use]
    pub const fn is_last_page(self, returned: usize) -> bool {
        (returned as u64) < self.limit
    }
}
