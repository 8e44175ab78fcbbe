// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Searchable;
use crate::config::CatalogConfig;
use crate::mapper::{FromRecord, MalformedRecord, RawRecord};
use crate::search::{KeywordField, SearchIndex, SearchProfile};

/// A facet shoppers can filter products on, e.g. `color`.
///
/// Active filters define the facet keys the query compiler accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub key: String,
    pub label: String,
    /// Built-in filters cannot be edited from the back-office
    pub editable: bool,
    pub active: bool,
    pub score: i64,
    pub values: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl FromRecord for Filter {
    const KIND: &'static str = "filter";

    fn from_record(record: &RawRecord) -> Result<Self, MalformedRecord> {
        Ok(Self {
            key: record.required("key")?.to_string(),
            label: record.text("label"),
            editable: record.get("editable") == Some("1"),
            active: record.get("active") == Some("1"),
            score: record.int_or("score", 0),
            values: record.list("values"),
            updated_at: record.timestamp("updated_at")?,
        })
    }
}

impl Searchable for Filter {
    fn profile(config: &CatalogConfig) -> SearchProfile {
        SearchProfile::new(Self::KIND, &config.indexes.filter)
            .with_keywords(vec![KeywordField::tag("key"), KeywordField::text("label")])
    }

    fn index(config: &CatalogConfig) -> SearchIndex {
        SearchIndex::new(&config.indexes.filter, "filter:")
            .tag("key")
            .text("label")
            .tag("active")
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
            ("key", "color"),
            ("label", "Color"),
            ("editable", "1"),
            ("active", "1"),
            ("values", "blue;red"),
            ("updated_at", "1700000000"),
        ]
        .into_iter()
        .collect();

        let filter = Filter::from_record(&record).unwrap();
        assert!(filter.editable && filter.active);
        assert_eq!(filter.values, vec!["blue", "red"]);
    }

    #[test]
    fn test_updated_at_required() {
        let record: RawRecord = [("key", "color")].into_iter().collect();
        assert_eq!(Filter::from_record(&record).unwrap_err().field(), "updated_at");
    }
}
