// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Reference data API for Catalog
//!
//! Each `reload_*` call searches the whole document kind, builds the next
//! value and swaps it in. On failure the previous snapshot stays in place.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{Filter, Product, Searchable, SeoContent, Tag};
use crate::metrics;
use crate::pagination::Window;
use crate::query::Query;
use crate::routing::{RouteTarget, Router};
use crate::snapshot::{SeoTable, TagTree};

use super::{Catalog, SearchError};

impl Catalog {
    /// Rebuild the category tree from every tag. Returns the number of tags read.
    pub async fn reload_tags(&self) -> Result<usize, SearchError> {
        let tags = self.load_all::<Tag>("tags").await?;
        self.tags.store(TagTree::build(&tags));
        Ok(tags.len())
    }

    /// Current category tree
    pub fn tag_tree(&self) -> Arc<TagTree> {
        self.tags.load()
    }

    /// Rebuild the SEO table. Returns the number of pages read.
    pub async fn reload_seo(&self) -> Result<usize, SearchError> {
        let contents = self.load_all::<SeoContent>("seo").await?;
        let count = contents.len();
        self.seo.store(SeoTable::build(contents));
        Ok(count)
    }

    /// Current SEO table
    pub fn seo(&self) -> Arc<SeoTable> {
        self.seo.load()
    }

    /// Accept exactly the keys of the active filters as facets. Returns the
    /// number of facet keys now known.
    pub async fn reload_facets(&self) -> Result<usize, SearchError> {
        let filters = self.load_all::<Filter>("facets").await?;
        let keys: Vec<String> = filters
            .into_iter()
            .filter(|f| f.active)
            .map(|f| f.key)
            .collect();
        let count = keys.len();
        self.set_facets(keys);
        Ok(count)
    }

    /// Replace the known facet keys.
    pub fn set_facets<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let compiler = self.compiler.load().as_ref().clone().with_facets(keys);
        self.compiler.store(compiler);
    }

    /// Path resolver over the current SEO table
    pub fn router(&self) -> Router {
        Router::new(self.seo.load())
    }

    pub fn resolve(&self, path: &str) -> RouteTarget {
        self.router().resolve(path)
    }

    /// Public link of a product
    pub fn product_url(&self, product: &Product) -> String {
        product.url(&self.config.website_url)
    }

    async fn load_all<T: Searchable>(&self, snapshot: &'static str) -> Result<Vec<T>, SearchError> {
        let profile = T::profile(&self.config);
        let window = Window::new(0, self.config.snapshot_limit);

        match self.search_window::<T>(&Query::default().admin(), &profile, window).await {
            Ok(result) => {
                metrics::record_snapshot_reload(snapshot, true);
                info!(snapshot, kind = T::KIND, count = result.items.len(), total = result.total, "Snapshot reloaded");
                Ok(result.items)
            }
            Err(e) => {
                metrics::record_snapshot_reload(snapshot, false);
                error!(snapshot, error = %e, "Snapshot reload failed, keeping previous value");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::mapper::RawRecord;
    use crate::storage::memory::InMemoryBackend;
    use crate::storage::traits::BackendError;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().copied().collect()
    }

    async fn catalog() -> (Catalog, Arc<InMemoryBackend>) {
        let backend = Arc::new(InMemoryBackend::new());
        let catalog = Catalog::new(CatalogConfig::default(), backend.clone());
        catalog.create_indexes().await.unwrap();
        (catalog, backend)
    }

    #[tokio::test]
    async fn test_reload_facets_keeps_active_only() {
        let (catalog, backend) = catalog().await;
        backend.insert("filter:color", record(&[("key", "color"), ("active", "1"), ("updated_at", "1")]));
        backend.insert("filter:size", record(&[("key", "size"), ("active", "0"), ("updated_at", "1")]));

        assert_eq!(catalog.reload_facets().await.unwrap(), 1);
        let compiler = catalog.compiler.load();
        assert!(compiler.is_known_facet("color"));
        assert!(!compiler.is_known_facet("size"));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_snapshot() {
        let (catalog, backend) = catalog().await;
        backend.insert(
            "tag:clothes",
            record(&[("key", "clothes"), ("label", "Clothes"), ("root", "1"), ("updated_at", "1")]),
        );
        assert_eq!(catalog.reload_tags().await.unwrap(), 1);
        let before = catalog.tag_tree();

        backend.set_failure(Some(BackendError::Connection("refused".into())));
        assert!(catalog.reload_tags().await.is_err());
        assert_eq!(catalog.tag_tree(), before);
    }

    #[tokio::test]
    async fn test_resolve_through_seo() {
        let (catalog, backend) = catalog().await;
        backend.insert(
            "seo:about",
            record(&[("key", "about"), ("url", "a-propos"), ("title", "About"), ("updated_at", "1")]),
        );
        assert_eq!(catalog.resolve("/a-propos"), RouteTarget::NotFound);

        catalog.reload_seo().await.unwrap();
        assert_eq!(catalog.resolve("/a-propos"), RouteTarget::Page { key: "about".into() });
        assert_eq!(catalog.router().url_for("about"), Some("a-propos"));
    }
}
