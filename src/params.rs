// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Web request parameters
//!
//! Collects the raw search parameters of a request and turns them into a
//! [`Query`] and a [`Paginator`].
//!
//! | Param  | Meaning                        |
//! |--------|--------------------------------|
//! | `q`    | keywords                       |
//! | `page` | page number (falls back to 1)  |
//! | `tags` | tag, repeatable                |
//! | `min`  | minimum price                  |
//! | `max`  | maximum price                  |
//! | `type` | document type                  |
//! | `lang` | locale                         |
//! | other  | facet key, repeatable          |
//!
//! # Example
//!
//! ```
//! use catalog_search::params::{ParseMode, QueryParams};
//!
//! let params = QueryParams::from_pairs([
//!     ("q", "scarf"),
//!     ("tags", "winter"),
//!     ("color", "blue"),
//!     ("max", "40"),
//!     ("page", "2"),
//! ]);
//!
//! let query = params.to_query(ParseMode::Strict).unwrap();
//! assert_eq!(query.price_max, Some(40.0));
//! assert_eq!(query.facets["color"], vec!["blue"]);
//! assert_eq!(params.paginator(12).offset, 12);
//! ```

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::pagination::Paginator;
use crate::query::Query;

const RESERVED: [&str; 7] = ["q", "page", "tags", "min", "max", "type", "lang"];

/// A request parameter that failed strict validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid parameter '{field}': {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// How malformed values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Malformed values are treated as absent (storefront)
    #[default]
    Lenient,
    /// Malformed values are rejected (back-office forms)
    Strict,
}

/// Raw search parameters of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub keywords: String,
    pub page: Option<String>,
    pub tags: Vec<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub kind: Option<String>,
    pub lang: Option<String>,
    pub facets: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Collect parameters from decoded `(name, value)` pairs. Empty values are
    /// ignored; for single-valued params the last occurrence wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();

        for (name, value) in pairs {
            let (name, value) = (name.as_ref().trim(), value.as_ref().trim());
            if name.is_empty() || value.is_empty() {
                continue;
            }
            let value = value.to_string();
            match name {
                "q" => params.keywords = value,
                "page" => params.page = Some(value),
                "tags" => params.tags.push(value),
                "min" => params.min = Some(value),
                "max" => params.max = Some(value),
                "type" => params.kind = Some(value),
                "lang" => params.lang = Some(value),
                facet => params.facets.entry(facet.to_string()).or_default().push(value),
            }
        }

        params
    }

    /// True if `name` has a fixed meaning and is never a facet
    pub fn is_reserved(name: &str) -> bool {
        RESERVED.contains(&name)
    }

    /// Build the search criteria.
    pub fn to_query(&self, mode: ParseMode) -> Result<Query, ValidationError> {
        let price_min = parse_price("min", self.min.as_deref(), mode)?;
        let price_max = parse_price("max", self.max.as_deref(), mode)?;

        if let (Some(min), Some(max)) = (price_min, price_max) {
            if min > max && mode == ParseMode::Strict {
                return Err(ValidationError::new("min", "greater than max"));
            }
        }

        Ok(Query {
            keywords: self.keywords.clone(),
            tags: self.tags.iter().cloned().collect(),
            facets: self.facets.clone(),
            price_min,
            price_max,
            kind: self.kind.clone(),
            locale: self.lang.clone(),
            ..Default::default()
        })
    }

    /// Paginator for the requested page; a bad page number means page 1.
    pub fn paginator(&self, items_per_page: u64) -> Paginator {
        Paginator::from_params(self.page.as_deref(), Some(self.keywords.as_str()), items_per_page)
    }
}

fn parse_price(field: &str, raw: Option<&str>, mode: ParseMode) -> Result<Option<f64>, ValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let reason = match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => return Ok(Some(value)),
        Ok(_) => "must be a non-negative number",
        Err(_) => "not a number",
    };

    match mode {
        ParseMode::Strict => Err(ValidationError::new(field, reason)),
        ParseMode::Lenient => {
            debug!(field, value = raw, reason, "Ignoring malformed price bound");
            Ok(None)
        }
    }
}
