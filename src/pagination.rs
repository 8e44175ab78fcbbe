// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Pagination
//!
//! Two computations share the same items-per-page constant:
//!
//! ```text
//! raw "page" param ──→ Paginator { page, offset, limit } ──→ Window (LIMIT offset count)
//!                                   │
//!            (total, loaded) ───────┴──→ Pagination { page_window, start, end, ... }
//! ```
//!
//! The [`Paginator`] keeps the items-per-page value it was built with, so the
//! window sent to the index and the metadata shown to the user cannot diverge.

use serde::Serialize;

/// Number of page links shown on each side of the current page.
const WINDOW_RADIUS: u64 = 2;

/// Offset/limit pair requested from the index.
///
/// `limit` is the exclusive end position, so the number of rows to fetch is
/// `limit - offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

impl Window {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit: limit.max(offset),
        }
    }

    /// Number of rows in the window.
    pub fn count(&self) -> u64 {
        self.limit - self.offset
    }
}

/// Per-request pagination state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginator {
    /// Current page, 1-based
    pub page: u64,
    /// Zero-based position of the first item
    pub offset: u64,
    /// Exclusive end position (`offset + items_per_page`)
    pub limit: u64,
    /// Free-text query carried along for the view (`q` param)
    pub query: String,
    items_per_page: u64,
}

impl Paginator {
    /// Build the paginator for a page number. Page 0 is clamped to 1, and so
    /// is an `items_per_page` of 0. A page whose end position does not fit in
    /// a `u64` is clamped to [`Paginator::last_addressable_page`].
    pub fn new(page: u64, items_per_page: u64) -> Self {
        let items_per_page = items_per_page.max(1);
        let page = page.clamp(1, Self::last_addressable_page(items_per_page));
        let offset = (page - 1) * items_per_page;

        Self {
            page,
            offset,
            limit: offset + items_per_page,
            query: String::new(),
            items_per_page,
        }
    }

    /// Build from raw request parameters.
    ///
    /// A missing, non-numeric or non-positive page falls back to page 1, and
    /// so does a page too large to address.
    pub fn from_params(page: Option<&str>, query: Option<&str>, items_per_page: u64) -> Self {
        let last = Self::last_addressable_page(items_per_page.max(1));
        let page = page
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| (1..=last).contains(p))
            .unwrap_or(1);

        Self::new(page, items_per_page).with_query(query.unwrap_or_default())
    }

    /// Attach the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Highest page whose end position `page * items_per_page` fits in a `u64`.
    pub fn last_addressable_page(items_per_page: u64) -> u64 {
        u64::MAX / items_per_page.max(1)
    }

    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    /// Window to request from the index.
    pub fn window(&self) -> Window {
        Window::new(self.offset, self.limit)
    }

    /// Compute the display metadata.
    ///
    /// `total` is the full match count, `loaded` the number of items actually
    /// returned for this page.
    pub fn build(&self, total: u64, loaded: u64) -> Pagination {
        let ipp = self.items_per_page;
        let page = self.page;

        let mut max_page = total / ipp;
        if total % ipp > 0 {
            max_page += 1;
        }

        let mut page_window = Vec::with_capacity(2 * WINDOW_RADIUS as usize + 1);
        for step in (1..=WINDOW_RADIUS).rev() {
            if page > step {
                page_window.push(page - step);
            }
        }
        page_window.push(page);
        for step in 1..=WINDOW_RADIUS {
            match page.checked_add(step) {
                Some(next) if next <= max_page => page_window.push(next),
                _ => break,
            }
        }

        let first_index = (page - 1).saturating_mul(ipp);
        let start = if loaded > 0 { first_index + 1 } else { 0 };

        Pagination {
            is_first: page == 1,
            // No pages at all: nothing follows, so the current page is the last
            is_last: max_page == 0 || page == max_page,
            page_window,
            max_page,
            page,
            start,
            end: first_index.saturating_add(loaded),
            total,
        }
    }
}

/// Display pagination for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub is_first: bool,
    pub is_last: bool,
    /// Up to five consecutive page numbers around the current page
    pub page_window: Vec<u64>,
    pub max_page: u64,
    pub page: u64,
    /// 1-based index of the first item shown, 0 when nothing is shown
    pub start: u64,
    /// 1-based index of the last item shown
    pub end: u64,
    pub total: u64,
}

impl Pagination {
    /// False when the result set is empty.
    pub fn has_pages(&self) -> bool {
        self.max_page > 0
    }

    /// Next page number, if any.
    pub fn next(&self) -> Option<u64> {
        (self.page < self.max_page).then(|| self.page + 1)
    }

    /// Previous page number, if any.
    pub fn previous(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }
}
