// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search profiles
//!
//! A profile tells the compiler which index fields carry each criterion for
//! one kind of document (product, article, session, ...). Criteria the
//! profile has no field for are skipped.

use super::index_manager::SearchFieldType;

/// Status value of published documents.
pub const ONLINE: &str = "online";

/// A field keywords are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordField {
    pub name: &'static str,
    /// TEXT fields match terms, TAG fields match whole values
    pub kind: SearchFieldType,
}

impl KeywordField {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: SearchFieldType::Text }
    }

    pub const fn tag(name: &'static str) -> Self {
        Self { name, kind: SearchFieldType::Tag }
    }
}

/// Field layout of one index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchProfile {
    /// Document kind, used as metrics/log label
    pub name: &'static str,
    /// RediSearch index name
    pub index: String,
    /// TAG field holding the publication status
    pub status_field: Option<&'static str>,
    /// TAG field holding the document type
    pub type_field: Option<&'static str>,
    /// Type applied when the query names none
    pub default_type: Option<&'static str>,
    /// Fields OR-ed together for keyword search
    pub keyword_fields: Vec<KeywordField>,
    pub slug_field: Option<&'static str>,
    pub tag_field: Option<&'static str>,
    /// TAG field holding `key_value` facet tokens
    pub facet_field: Option<&'static str>,
    pub price_field: Option<&'static str>,
    pub locale_field: Option<&'static str>,
    /// TAG field holding the owning user id
    pub owner_field: Option<&'static str>,
    /// Sortable field, newest first
    pub sort_field: &'static str,
}

impl SearchProfile {
    /// Profile with only a sort field; use the `with_*` setters for the rest.
    pub fn new(name: &'static str, index: impl Into<String>) -> Self {
        Self {
            name,
            index: index.into(),
            status_field: None,
            type_field: None,
            default_type: None,
            keyword_fields: Vec::new(),
            slug_field: None,
            tag_field: None,
            facet_field: None,
            price_field: None,
            locale_field: None,
            owner_field: None,
            sort_field: "updated_at",
        }
    }

    pub fn with_status(mut self, field: &'static str) -> Self {
        self.status_field = Some(field);
        self
    }

    pub fn with_type(mut self, field: &'static str, default: Option<&'static str>) -> Self {
        self.type_field = Some(field);
        self.default_type = default;
        self
    }

    pub fn with_keywords(mut self, fields: Vec<KeywordField>) -> Self {
        self.keyword_fields = fields;
        self
    }

    pub fn with_slug(mut self, field: &'static str) -> Self {
        self.slug_field = Some(field);
        self
    }

    pub fn with_tags(mut self, field: &'static str) -> Self {
        self.tag_field = Some(field);
        self
    }

    pub fn with_facets(mut self, field: &'static str) -> Self {
        self.facet_field = Some(field);
        self
    }

    pub fn with_price(mut self, field: &'static str) -> Self {
        self.price_field = Some(field);
        self
    }

    pub fn with_locale(mut self, field: &'static str) -> Self {
        self.locale_field = Some(field);
        self
    }

    pub fn with_owner(mut self, field: &'static str) -> Self {
        self.owner_field = Some(field);
        self
    }

    pub fn sorted_by(mut self, field: &'static str) -> Self {
        self.sort_field = field;
        self
    }
}
