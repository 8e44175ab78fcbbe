// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Catalog entities
//!
//! Each entity knows how to build itself from a [`RawRecord`](crate::mapper::RawRecord)
//! and which index fields carry each search criterion:
//!
//! | Entity       | Key prefix  | Index         |
//! |--------------|-------------|---------------|
//! | [`Product`]  | `product:`  | `product-idx` |
//! | [`Article`]  | `blog:`     | `blog-idx`    |
//! | [`Session`]  | `session:`  | `session-idx` |
//! | [`Tag`]      | `tag:`      | `tag-idx`     |
//! | [`Filter`]   | `filter:`   | `filter-idx`  |
//! | [`SeoContent`] | `seo:`    | `seo-idx`     |
//!
//! List values (tags, children, facet tokens) are joined with `;`, the TAG
//! separator of every index.

mod article;
mod filter;
mod product;
mod seo;
mod session;
mod tag;

pub use article::{Article, ArticleKind};
pub use filter::Filter;
pub use product::{Product, ProductStatus};
pub use seo::SeoContent;
pub use session::Session;
pub use tag::Tag;

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::CatalogConfig;
use crate::mapper::FromRecord;
use crate::search::{facet_token, SearchIndex, SearchProfile, TAG_SEPARATOR};

/// Entities that can be searched.
pub trait Searchable: FromRecord {
    /// Field layout used to compile queries
    fn profile(config: &CatalogConfig) -> SearchProfile;

    /// Index definition backing the profile
    fn index(config: &CatalogConfig) -> SearchIndex;
}

/// Split a `;`-joined list, dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join list items with `;`.
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    let separator = TAG_SEPARATOR.to_string();
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join(separator.as_str())
}

/// Facet values by key, e.g. `color → [blue, red]`.
pub type Meta = BTreeMap<String, Vec<String>>;

/// Serialize facets to `key_value;key_value`.
///
/// Keys are visited in order, so the output is stable.
pub fn serialize_meta(meta: &Meta) -> String {
    let tokens: Vec<String> = meta
        .iter()
        .flat_map(|(key, values)| values.iter().map(move |value| facet_token(key, value)))
        .collect();
    join_list(&tokens)
}

/// Parse `key_value;key_value` back into facets.
///
/// A token that does not split into exactly one non-empty key and one
/// non-empty value is skipped.
pub fn parse_meta(serialized: &str) -> Meta {
    let mut meta = Meta::new();

    for token in split_list(serialized) {
        let parts: Vec<&str> = token.split('_').collect();
        match parts.as_slice() {
            [key, value] if !key.is_empty() && !value.is_empty() => {
                meta.entry(key.to_string()).or_default().push(value.to_string());
            }
            _ => warn!(token = %token, "Skipping malformed meta token"),
        }
    }

    meta
}
