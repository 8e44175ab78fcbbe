// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Catalog search criteria.
//!
//! # Example
//!
//! ```
//! use catalog_search::Query;
//!
//! let query = Query::keywords("wool scarf")
//!     .with_tag("winter")
//!     .with_facet("color", ["blue", "grey"])
//!     .with_price(Some(10.0), Some(50.0));
//!
//! assert!(!query.is_empty());
//! assert!(Query::default().is_empty());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Which documents a search may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchScope {
    /// Storefront: published documents only
    #[default]
    Public,
    /// Back-office: every status
    Admin,
}

/// Structured search criteria. Every field is optional; an empty query
/// matches everything visible in its scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub keywords: String,
    pub slug: String,
    pub tags: BTreeSet<String>,
    /// Facet key → accepted values
    pub facets: BTreeMap<String, Vec<String>>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Document type, e.g. "blog" or "cms"
    pub kind: Option<String>,
    pub locale: Option<String>,
    /// Owning user id (sessions)
    pub owner: Option<u64>,
    pub scope: SearchScope,
}

impl Query {
    /// Keyword search
    pub fn keywords(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..Default::default()
        }
    }

    /// Exact slug lookup
    pub fn slug(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    /// Documents owned by a user
    pub fn owned_by(uid: u64) -> Self {
        Self {
            owner: Some(uid),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_facet<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_price(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Search every status (back-office listings)
    pub fn admin(mut self) -> Self {
        self.scope = SearchScope::Admin;
        self
    }

    /// True if no criterion is set (scope aside).
    pub fn is_empty(&self) -> bool {
        self.keywords.trim().is_empty()
            && self.slug.is_empty()
            && self.tags.is_empty()
            && self.facets.values().all(Vec::is_empty)
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.kind.is_none()
            && self.locale.is_none()
            && self.owner.is_none()
    }
}
