// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use async_trait::async_trait;
use thiserror::Error;

use crate::mapper::RawRecord;
use crate::search::{CompiledQuery, SearchIndex};

/// Failures of the index engine or the path to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("cannot reach search backend: {0}")]
    Connection(String),
    #[error("search timed out after {0} ms")]
    Timeout(u64),
    #[error("unexpected reply from search backend: {0}")]
    Protocol(String),
    #[error("search backend rejected the query: {0}")]
    Engine(String),
}

impl BackendError {
    /// Label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Timeout(_) => "timeout",
            Self::Protocol(_) => "protocol",
            Self::Engine(_) => "engine",
        }
    }
}

/// Raw answer to one FT.SEARCH call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchReply {
    /// Full match count, independent of the window
    pub total: u64,
    /// Records inside the window, in index order
    pub records: Vec<RawRecord>,
}

/// Executes compiled queries against an index engine.
///
/// Implementations do not retry; a failed call is reported to the caller.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn execute(&self, query: &CompiledQuery) -> Result<SearchReply, BackendError>;

    /// Create an index. Creating an index that already exists succeeds.
    async fn create_index(&self, index: &SearchIndex) -> Result<(), BackendError>;
}
