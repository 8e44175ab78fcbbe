// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Catalog facade.
//!
//! The [`Catalog`] ties the search flow together for request handlers:
//!
//! ```text
//! Query + Paginator
//!       │
//!       ├─→ QueryCompiler::compile (profile of T, window)
//!       │
//!       ├─→ SearchBackend::execute (optional timeout)
//!       │
//!       ├─→ map_records::<T> (malformed records skipped)
//!       │
//!       └─→ SearchResult<T> ──→ Paginator::build
//! ```
//!
//! It also owns the reference data every page needs (category tree, SEO
//! table, known facet keys) as snapshots, reloaded from the index on demand.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use catalog_search::{Catalog, CatalogConfig, Paginator, Product, Query};
//! use catalog_search::storage::memory::InMemoryBackend;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let catalog = Catalog::new(CatalogConfig::default(), Arc::new(InMemoryBackend::new()));
//! catalog.create_indexes().await.unwrap();
//!
//! let paginator = catalog.paginator(Some("1"), Some("scarf"));
//! let result = catalog
//!     .search::<Product>(&Query::keywords("scarf"), &paginator)
//!     .await
//!     .unwrap();
//! assert_eq!(result.total, 0);
//! assert!(!result.pagination(&paginator).has_pages());
//! # }
//! ```

mod index_api;
mod search_api;
mod snapshot_api;
mod types;

pub use types::{SearchError, SearchResult};

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::domain::{Article, Filter, Product, Searchable, SeoContent, Session, Tag};
use crate::pagination::Paginator;
use crate::search::{IndexManager, QueryCompiler};
use crate::snapshot::{SeoTable, Snapshot, TagTree};
use crate::storage::traits::SearchBackend;

/// Search entry point shared by all request handlers.
///
/// `Send + Sync`; share it behind an `Arc`.
pub struct Catalog {
    pub(super) config: CatalogConfig,
    pub(super) backend: Arc<dyn SearchBackend>,
    /// Index definitions, one per searchable entity
    pub(super) indexes: IndexManager,
    /// Compiler with the current facet keys
    pub(super) compiler: Snapshot<QueryCompiler>,
    pub(super) tags: Snapshot<TagTree>,
    pub(super) seo: Snapshot<SeoTable>,
}

impl Catalog {
    /// Create a catalog over `backend`. Reference data starts empty; call the
    /// `reload_*` methods once the indexes are populated.
    pub fn new(config: CatalogConfig, backend: Arc<dyn SearchBackend>) -> Self {
        let mut indexes = IndexManager::new();
        indexes.register(Product::index(&config));
        indexes.register(Article::index(&config));
        indexes.register(Session::index(&config));
        indexes.register(Tag::index(&config));
        indexes.register(Filter::index(&config));
        indexes.register(SeoContent::index(&config));

        let compiler = QueryCompiler::new().with_dialect(config.dialect);

        Self {
            config,
            backend,
            indexes,
            compiler: Snapshot::new(compiler),
            tags: Snapshot::default(),
            seo: Snapshot::default(),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn indexes(&self) -> &IndexManager {
        &self.indexes
    }

    /// Paginator for raw `page` and `q` request values, using the configured
    /// page size.
    pub fn paginator(&self, page: Option<&str>, query: Option<&str>) -> Paginator {
        Paginator::from_params(page, query, self.config.items_per_page)
    }
}
