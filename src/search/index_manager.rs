// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index Manager
//!
//! Index definitions for the catalog hashes.
//!
//! # RediSearch Index Creation
//!
//! ```text
//! FT.CREATE product-idx
//!   ON HASH
//!   PREFIX 1 product:
//!   SCHEMA
//!     title TEXT
//!     sku TAG SEPARATOR ;
//!     price NUMERIC SORTABLE
//!     updated_at NUMERIC SORTABLE
//! ```
//!
//! TAG fields use `;` as separator, matching how list values (tags, facet
//! tokens) are joined when a hash is written.

use std::collections::HashMap;

/// Separator between values of a TAG field.
pub const TAG_SEPARATOR: char = ';';

/// Search index definition
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndex {
    /// Index name, e.g. "product-idx"
    pub name: String,
    /// Key prefix this index covers, e.g. "product:"
    pub prefix: String,
    /// Field definitions for the index
    pub fields: Vec<SearchField>,
}

impl SearchIndex {
    /// Create a new search index definition
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            fields: Vec::new(),
        }
    }

    fn field(mut self, name: impl Into<String>, field_type: SearchFieldType, sortable: bool) -> Self {
        self.fields.push(SearchField {
            name: name.into(),
            field_type,
            sortable,
        });
        self
    }

    /// Add a text field
    pub fn text(self, name: impl Into<String>) -> Self {
        self.field(name, SearchFieldType::Text, false)
    }

    /// Add a sortable text field
    pub fn text_sortable(self, name: impl Into<String>) -> Self {
        self.field(name, SearchFieldType::Text, true)
    }

    /// Add a numeric field
    pub fn numeric(self, name: impl Into<String>) -> Self {
        self.field(name, SearchFieldType::Numeric, false)
    }

    /// Add a sortable numeric field
    pub fn numeric_sortable(self, name: impl Into<String>) -> Self {
        self.field(name, SearchFieldType::Numeric, true)
    }

    /// Add a tag field
    pub fn tag(self, name: impl Into<String>) -> Self {
        self.field(name, SearchFieldType::Tag, false)
    }

    /// Type of a field, if the index declares it
    pub fn field_type(&self, name: &str) -> Option<SearchFieldType> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.field_type)
    }

    /// True if `key` is covered by this index
    pub fn covers(&self, key: &str) -> bool {
        key.starts_with(&self.prefix)
    }

    /// Generate the FT.CREATE command arguments
    pub fn to_ft_create_args(&self) -> Vec<String> {
        let mut args = vec![
            self.name.clone(),
            "ON".to_string(),
            "HASH".to_string(),
            "PREFIX".to_string(),
            "1".to_string(),
            self.prefix.clone(),
            "SCHEMA".to_string(),
        ];

        for field in &self.fields {
            args.extend(field.to_schema_args());
        }

        args
    }
}

/// Search field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    /// Hash field name, also used in queries
    pub name: String,
    pub field_type: SearchFieldType,
    /// Whether the field is sortable
    pub sortable: bool,
}

impl SearchField {
    fn to_schema_args(&self) -> Vec<String> {
        let mut args = vec![self.name.clone(), self.field_type.to_string()];

        if self.field_type == SearchFieldType::Tag {
            args.push("SEPARATOR".to_string());
            args.push(TAG_SEPARATOR.to_string());
        }

        if self.sortable {
            args.push("SORTABLE".to_string());
        }

        args
    }
}

/// Search field types used by the catalog indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFieldType {
    /// Full-text searchable field
    Text,
    /// Numeric field (supports range queries)
    Numeric,
    /// Tag field (exact match, supports OR)
    Tag,
}

impl std::fmt::Display for SearchFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchFieldType::Text => write!(f, "TEXT"),
            SearchFieldType::Numeric => write!(f, "NUMERIC"),
            SearchFieldType::Tag => write!(f, "TAG"),
        }
    }
}

/// Registry of index definitions
#[derive(Debug, Clone, Default)]
pub struct IndexManager {
    /// Registered indexes by name
    indexes: HashMap<String, SearchIndex>,
}

impl IndexManager {
    /// Create a new index manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an index definition, replacing any with the same name
    pub fn register(&mut self, index: SearchIndex) {
        self.indexes.insert(index.name.clone(), index);
    }

    /// Get a registered index by name
    pub fn get(&self, name: &str) -> Option<&SearchIndex> {
        self.indexes.get(name)
    }

    /// Get all registered indexes
    pub fn all(&self) -> impl Iterator<Item = &SearchIndex> {
        self.indexes.values()
    }

    /// Generate FT.CREATE arguments for an index
    pub fn ft_create_args(&self, name: &str) -> Option<Vec<String>> {
        self.indexes.get(name).map(|idx| idx.to_ft_create_args())
    }

    /// Find index by prefix match
    pub fn find_by_prefix(&self, key: &str) -> Option<&SearchIndex> {
        self.indexes.values().find(|idx| idx.covers(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_index() -> SearchIndex {
        SearchIndex::new("product-idx", "product:")
            .text("title")
            .tag("sku")
            .numeric_sortable("price")
            .numeric_sortable("updated_at")
    }

    #[test]
    fn test_simple_index() {
        let args = product_index().to_ft_create_args();
        assert_eq!(args[0], "product-idx");
        assert_eq!(args[1], "ON");
        assert_eq!(args[2], "HASH");
        assert_eq!(args[3], "PREFIX");
        assert_eq!(args[4], "1");
        assert_eq!(args[5], "product:");
        assert_eq!(args[6], "SCHEMA");
    }

    #[test]
    fn test_sortable_fields() {
        let args = product_index().to_ft_create_args();
        let sortable_count = args.iter().filter(|a| *a == "SORTABLE").count();
        assert_eq!(sortable_count, 2);
    }

    #[test]
    fn test_sortable_text_field() {
        let args = SearchIndex::new("seo-idx", "seo:")
            .text_sortable("key")
            .text("url")
            .to_ft_create_args();
        let cmd = args.join(" ");
        assert!(cmd.contains("key TEXT SORTABLE"));
        assert!(cmd.contains("url TEXT"));
        assert!(!cmd.contains("url TEXT SORTABLE"));
    }

    #[test]
    fn test_tag_field_separator() {
        let cmd = format!("FT.CREATE {}", product_index().to_ft_create_args().join(" "));
        assert!(cmd.contains("sku TAG SEPARATOR ;"));
        assert!(cmd.contains("title TEXT price"));
        assert!(cmd.contains("updated_at NUMERIC SORTABLE"));
    }

    #[test]
    fn test_field_type_lookup() {
        let index = product_index();
        assert_eq!(index.field_type("sku"), Some(SearchFieldType::Tag));
        assert_eq!(index.field_type("missing"), None);
    }

    #[test]
    fn test_index_manager_register() {
        let mut manager = IndexManager::new();
        manager.register(product_index());

        assert!(manager.get("product-idx").is_some());
        assert!(manager.get("unknown").is_none());
        assert!(manager.ft_create_args("product-idx").is_some());
    }

    #[test]
    fn test_index_manager_find_by_prefix() {
        let mut manager = IndexManager::new();
        manager.register(SearchIndex::new("product-idx", "product:"));
        manager.register(SearchIndex::new("blog-idx", "blog:"));

        let found = manager.find_by_prefix("product:abc123");
        assert_eq!(found.map(|i| i.name.as_str()), Some("product-idx"));

        let found = manager.find_by_prefix("blog:7");
        assert_eq!(found.map(|i| i.name.as_str()), Some("blog-idx"));

        assert!(manager.find_by_prefix("session:1").is_none());
    }
}
