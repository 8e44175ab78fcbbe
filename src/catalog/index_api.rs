// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index management API for Catalog

use tracing::{debug, error, info};

use super::{Catalog, SearchError};

impl Catalog {
    /// Create every catalog index. Indexes that already exist are left as is.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use catalog_search::Catalog;
    /// # async fn example(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    /// // Once at startup, before the first search
    /// catalog.create_indexes().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_indexes(&self) -> Result<(), SearchError> {
        for index in self.indexes.all() {
            debug!(index = %index.name, prefix = %index.prefix, "Creating search index");
            if let Err(e) = self.backend.create_index(index).await {
                error!(index = %index.name, error = %e, "Cannot create search index");
                return Err(e.into());
            }
        }

        info!(count = self.indexes.all().count(), "Search indexes ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::CatalogConfig;
    use crate::storage::memory::InMemoryBackend;
    use crate::storage::traits::BackendError;

    #[tokio::test]
    async fn test_create_indexes_is_idempotent() {
        let catalog = Catalog::new(CatalogConfig::default(), Arc::new(InMemoryBackend::new()));
        catalog.create_indexes().await.unwrap();
        catalog.create_indexes().await.unwrap();
        assert_eq!(catalog.indexes().all().count(), 6);
        assert!(catalog.indexes().find_by_prefix("product:42").is_some());
    }

    #[tokio::test]
    async fn test_create_indexes_failure() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.set_failure(Some(BackendError::Connection("refused".into())));
        let catalog = Catalog::new(CatalogConfig::default(), backend);

        let err = catalog.create_indexes().await.unwrap_err();
        assert!(err.is_retryable());
    }
}
