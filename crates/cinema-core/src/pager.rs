//! Pagination and sort state shared by every paged movie grid.
//!
//! The pager performs no I/O. Each mutator reports whether the visible page
//! changed; the owning view issues exactly one fetch when it did.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Number of numbered page buttons shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// Server-side sort order for movie listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Latest,
    Rating,
    Title,
}

impl SortKey {
    /// Value of the `sort_by` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Rating => "rating",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "rating" => Ok(Self::Rating),
            "title" => Ok(Self::Title),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Snapshot of one list view's paging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// 1-based
    pub page_index: u32,
    pub page_size: u32,
    pub sort_key: SortKey,
    pub total_count: Option<u64>,
}

impl PageState {
    /// Offset of the first row on the current page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page_index.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// Pagination state machine for a movie grid or admin table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPager {
    state: PageState,
}

impl Default for ListPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, SortKey::default())
    }
}

impl ListPager {
    pub fn new(page_size: u32, sort_key: SortKey) -> Self {
        Self {
            state: PageState {
                page_index: 1,
                page_size: page_size.max(1),
                sort_key,
                total_count: None,
            },
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn page_index(&self) -> u32 {
        self.state.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.state.page_size
    }

    pub fn sort_key(&self) -> SortKey {
        self.state.sort_key
    }

    pub fn skip(&self) -> u64 {
        self.state.skip()
    }

    /// `ceil(total / page_size)`, never less than one page.
    ///
    /// An unknown total counts as a single page.
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.state.page_size);
        let pages = self
            .state
            .total_count
            .map(|total| total.div_ceil(size))
            .unwrap_or(1);
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// Records the total row count, pulling the page index back into range.
    ///
    /// Returns `true` if the page index had to move.
    pub fn set_total_count(&mut self, total: u64) -> bool {
        self.state.total_count = Some(total);
        self.set_page(self.state.page_index)
    }

    /// Changes the sort order and returns to page 1.
    pub fn set_sort(&mut self, key: SortKey) -> bool {
        let changed = self.state.sort_key != key || self.state.page_index != 1;
        self.state.sort_key = key;
        self.state.page_index = 1;
        changed
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, size: u32) -> bool {
        let size = size.max(1);
        let changed = self.state.page_size != size || self.state.page_index != 1;
        self.state.page_size = size;
        self.state.page_index = 1;
        changed
    }

    /// Moves to page `n`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, n: i64) -> bool {
        let clamped = n.clamp(1, i64::from(self.total_pages()));
        self.set_page(clamped as u32)
    }

    /// Moves to page `n` ahead of a total count that may be missing.
    ///
    /// With a known total this is [`go_to_page`](Self::go_to_page). Without
    /// one only the lower bound applies, so a requested page is not pulled
    /// back to 1 just because the count was unavailable.
    pub fn seek(&mut self, n: i64) -> bool {
        if self.state.total_count.is_some() {
            return self.go_to_page(n);
        }
        let page = u32::try_from(n.max(1)).unwrap_or(u32::MAX);
        let changed = self.state.page_index != page;
        self.state.page_index = page;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.set_page(self.state.page_index + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.set_page(self.state.page_index - 1)
    }

    /// Whether the "previous" control is enabled.
    pub fn has_prev(&self) -> bool {
        self.state.page_index > 1
    }

    /// Whether the "next" control is enabled.
    pub fn has_next(&self) -> bool {
        self.state.page_index < self.total_pages()
    }

    /// Page numbers to render as buttons.
    ///
    /// A window of [`PAGE_WINDOW`] pages centered on the current page, shifted
    /// to stay inside `[1, total_pages]` without shrinking unless there are
    /// fewer pages than the window.
    pub fn page_window(&self) -> RangeInclusive<u32> {
        let total = self.total_pages();
        let current = self.state.page_index;
        let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
        let end = (start + PAGE_WINDOW - 1).min(total);
        if end - start < PAGE_WINDOW - 1 {
            start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
        }
        start..=end
    }

    fn set_page(&mut self, page: u32) -> bool {
        let page = page.clamp(1, self.total_pages());
        let changed = self.state.page_index != page;
        self.state.page_index = page;
        changed
    }
}
