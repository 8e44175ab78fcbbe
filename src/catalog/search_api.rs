// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search API for Catalog

use tracing::{debug, error, info};

use crate::domain::{Searchable, Session};
use crate::mapper::{map_records, FromRecord};
use crate::metrics::{self, LatencyTimer};
use crate::pagination::{Paginator, Window};
use crate::query::Query;
use crate::search::{CompiledQuery, SearchProfile};
use crate::storage::traits::{BackendError, SearchReply};

use super::{Catalog, SearchError, SearchResult};

impl Catalog {
    /// Search one page of `T`.
    ///
    /// Records that fail to map are skipped, so `items` may be shorter than
    /// the page while `total` still counts them. A backend failure yields no
    /// items at all.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use catalog_search::{Catalog, Article, Paginator, Query};
    /// # async fn example(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    /// let query = Query::keywords("winter").with_kind("cms").with_locale("fr");
    /// let paginator = Paginator::new(1, catalog.config().items_per_page);
    ///
    /// let result = catalog.search::<Article>(&query, &paginator).await?;
    /// for article in &result.items {
    ///     println!("{}", article.title);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search<T: Searchable>(
        &self,
        query: &Query,
        paginator: &Paginator,
    ) -> Result<SearchResult<T>, SearchError> {
        let profile = T::profile(&self.config);
        self.search_window(query, &profile, paginator.window()).await
    }

    /// First `T` with the given slug.
    pub async fn find_by_slug<T: Searchable>(&self, slug: &str) -> Result<Option<T>, SearchError> {
        let profile = T::profile(&self.config);
        let result = self
            .search_window::<T>(&Query::slug(slug), &profile, Window::new(0, 1))
            .await?;
        Ok(result.items.into_iter().next())
    }

    /// Active sessions of a user, newest first.
    pub async fn sessions(&self, uid: u64) -> Result<Vec<Session>, SearchError> {
        let profile = Session::profile(&self.config);
        let window = Window::new(0, self.config.session_limit);
        let result = self
            .search_window::<Session>(&Query::owned_by(uid), &profile, window)
            .await?;
        Ok(result.items)
    }

    /// Compile, execute and map one query.
    pub(super) async fn search_window<T: FromRecord>(
        &self,
        query: &Query,
        profile: &SearchProfile,
        window: Window,
    ) -> Result<SearchResult<T>, SearchError> {
        let compiled = self.compiler.load().compile(query, profile, window);
        let timer = LatencyTimer::new(profile.name);

        let reply = match self.execute(&compiled).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(profile = profile.name, index = %compiled.index, error = %e, "Search failed");
                metrics::record_query(profile.name, e.kind());
                return Err(e.into());
            }
        };

        let items = map_records::<T>(&reply.records);
        let skipped = reply.records.len() - items.len();

        metrics::record_query(profile.name, "success");
        metrics::record_results(profile.name, items.len());
        info!(
            profile = profile.name,
            total = reply.total,
            returned = items.len(),
            skipped,
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "Search done"
        );

        Ok(SearchResult {
            total: reply.total,
            items,
        })
    }

    async fn execute(&self, compiled: &CompiledQuery) -> Result<SearchReply, BackendError> {
        let Some(limit) = self.config.query_timeout() else {
            return self.backend.execute(compiled).await;
        };

        match tokio::time::timeout(limit, self.backend.execute(compiled)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(index = %compiled.index, timeout_ms = limit.as_millis() as u64, "Search timed out");
                Err(BackendError::Timeout(limit.as_millis() as u64))
            }
        }
    }
}
