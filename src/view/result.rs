//! Page of the filtered and sorted view

use super::state::PageSize;
use crate::data::Employee;

/// One page of visible rows plus what pagination controls need
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'r> {
    /// Rows on this page, in view order
    pub rows: Vec<&'r Employee>,
    /// Rows passing filters and quick-search, before pagination
    pub total_filtered: usize,
    /// Effective page index after clamping
    pub page_index: usize,
    pub page_size: PageSize,
    /// Number of pages; at least 1 even when nothing matches
    pub page_count: usize,
}

impl<'r> Page<'r> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// 1-based position of the first row on the page, 0 when empty
    pub fn first_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.page_index * self.page_size.get() + 1
        }
    }

    /// 1-based position of the last row on the page, 0 when empty
    pub fn last_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.page_index * self.page_size.get() + self.rows.len()
        }
    }
}
