// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Searchable;
use crate::config::CatalogConfig;
use crate::mapper::{FromRecord, MalformedRecord, RawRecord};
use crate::search::{KeywordField, SearchIndex, SearchProfile};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub label: String,
    pub image: String,
    /// Keys of the sub-categories
    pub children: Vec<String>,
    /// Shown at the top level of the menu
    pub root: bool,
    /// Menu position among roots, lowest first
    pub score: i64,
    pub updated_at: DateTime<Utc>,
}

impl FromRecord for Tag {
    const KIND: &'static str = "tag";

    fn from_record(record: &RawRecord) -> Result<Self, MalformedRecord> {
        Ok(Self {
            key: record.required("key")?.to_string(),
            label: record.text("label"),
            image: record.raw("image"),
            children: record.list("children"),
            root: record.get("root") == Some("1"),
            score: record.int_or("score", 0),
            updated_at: record.timestamp_or_epoch("updated_at"),
        })
    }
}

impl Searchable for Tag {
    fn profile(config: &CatalogConfig) -> SearchProfile {
        SearchProfile::new(Self::KIND, &config.indexes.tag)
            .with_keywords(vec![KeywordField::tag("key"), KeywordField::text("label")])
    }

    fn index(config: &CatalogConfig) -> SearchIndex {
        SearchIndex::new(&config.indexes.tag, "tag:")
            .tag("key")
            .text("label")
            .tag("root")
            .numeric("score")
            .numeric_sortable("updated_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record() {
        let record: RawRecord = [
            ("key", "clothes"),
            ("label", "Clothes"),
            ("children", "shirts;pants"),
            ("root", "1"),
            ("score", "2"),
        ]
        .into_iter()
        .collect();

        let tag = Tag::from_record(&record).unwrap();
        assert_eq!(tag.children, vec!["shirts", "pants"]);
        assert!(tag.root);
        assert_eq!(tag.score, 2);
    }

    #[test]
    fn test_leaf_tag() {
        let record: RawRecord = [("key", "shirts"), ("score", "x")].into_iter().collect();
        let tag = Tag::from_record(&record).unwrap();
        assert!(tag.children.is_empty());
        assert!(!tag.root);
        assert_eq!(tag.score, 0);
    }
}
