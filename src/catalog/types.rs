// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use serde::Serialize;
use thiserror::Error;

use crate::pagination::{Pagination, Paginator};
use crate::storage::traits::BackendError;

/// Why a search produced no answer.
///
/// An empty result is not an error: it is a [`SearchResult`] with `total == 0`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search unavailable: {0}")]
    Unavailable(#[from] BackendError),
}

impl SearchError {
    /// The same request may succeed later
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
        }
    }

    /// Metrics label of the underlying failure
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(err) => err.kind(),
        }
    }
}

/// One page of typed results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<T> {
    /// Full match count, independent of the page
    pub total: u64,
    /// Items of the requested page that mapped cleanly
    pub items: Vec<T>,
}

impl<T> Default for SearchResult<T> {
    fn default() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }
}

impl<T> SearchResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Display metadata for this page.
    pub fn pagination(&self, paginator: &Paginator) -> Pagination {
        paginator.build(self.total, self.items.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_is_retryable() {
        let err: SearchError = BackendError::Timeout(250).into();
        assert!(err.is_retryable());
        assert_eq!(err.kind(), "timeout");
        assert_eq!(err.to_string(), "search unavailable: search timed out after 250 ms");
    }

    #[test]
    fn test_pagination_uses_loaded_count() {
        let result = SearchResult {
            total: 30,
            items: vec![(); 6],
        };
        let pagination = result.pagination(&Paginator::new(3, 12));
        assert_eq!(pagination.start, 25);
        assert_eq!(pagination.end, 30);
        assert!(pagination.is_last);
    }
}
