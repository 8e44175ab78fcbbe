// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Searchable;
use crate::config::CatalogConfig;
use crate::mapper::{FromRecord, MalformedRecord, RawRecord};
use crate::search::{KeywordField, SearchIndex, SearchProfile};

/// SEO metadata of a site page, addressed by a stable key (`home`, `blog`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoContent {
    pub key: String,
    /// Public path of the page, e.g. `/nos-produits`
    pub url: String,
    pub title: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

impl FromRecord for SeoContent {
    const KIND: &'static str = "seo";

    fn from_record(record: &RawRecord) -> Result<Self, MalformedRecord> {
        Ok(Self {
            key: record.required("key")?.to_string(),
            url: record.text("url"),
            title: record.text("title"),
            description: record.text("description"),
            updated_at: record.timestamp_or_epoch("updated_at"),
        })
    }
}

impl Searchable for SeoContent {
    fn profile(config: &CatalogConfig) -> SearchProfile {
        SearchProfile::new(Self::KIND, &config.indexes.seo).with_keywords(vec![
            KeywordField::tag("key"),
            KeywordField::text("title"),
            KeywordField::text("description"),
        ])
    }

    fn index(config: &CatalogConfig) -> SearchIndex {
        SearchIndex::new(&config.indexes.seo, "seo:")
            .tag("key")
            .text("title")
            .text("description")
            .tag("url")
            .numeric_sortable("updated_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_unescapes() {
        let record: RawRecord = [
            ("key", "products"),
            ("url", "/nos\\-produits"),
            ("title", "Nos produits"),
        ]
        .into_iter()
        .collect();

        let content = SeoContent::from_record(&record).unwrap();
        assert_eq!(content.url, "/nos-produits");
        assert_eq!(content.description, "");
    }

    #[test]
    fn test_key_required() {
        let record: RawRecord = [("url", "/x")].into_iter().collect();
        assert!(SeoContent::from_record(&record).is_err());
    }
}
