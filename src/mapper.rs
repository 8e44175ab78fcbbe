// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Result mapping
//!
//! Search replies carry loosely-typed field maps. [`RawRecord`] wraps one of
//! them and is only read through its typed accessors; [`map_records`] turns a
//! batch into domain entities, skipping (and counting) any that are malformed.
//!
//! Two field policies apply:
//! - required fields (`required`, `int`, `float`) reject the record when
//!   missing or unparsable
//! - optional fields (`int_or`, `float_or`, ...) fall back to a default and
//!   log a warning

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;

use crate::domain::split_list;
use crate::metrics;
use crate::search::unescape;

/// Why a raw record could not become an entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("missing field '{field}'")]
    Missing { field: String },
    #[error("invalid value '{value}' for field '{field}'")]
    Invalid { field: String, value: String },
}

impl MalformedRecord {
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::Invalid { field, .. } => field,
        }
    }
}

/// One search hit as returned by the index: field name → string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord(HashMap<String, String>);

impl RawRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field as stored, if present
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Non-empty field or `Missing`
    pub fn required(&self, field: &str) -> Result<&str, MalformedRecord> {
        match self.get(field) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(MalformedRecord::Missing {
                field: field.to_string(),
            }),
        }
    }

    /// Field as stored, empty when absent
    pub fn raw(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    /// Escaped text field, unescaped; empty when absent
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(unescape).unwrap_or_default()
    }

    /// `;`-joined list field, unescaped
    pub fn list(&self, field: &str) -> Vec<String> {
        split_list(&self.text(field))
    }

    fn parse_required<T: FromStr>(&self, field: &str) -> Result<T, MalformedRecord> {
        let value = self.required(field)?;
        value.trim().parse().map_err(|_| MalformedRecord::Invalid {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    fn parse_or<T: FromStr>(&self, field: &str, default: T) -> T {
        match self.get(field).filter(|v| !v.is_empty()) {
            None => default,
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                warn!(field, value, "Unparsable optional field, using default");
                default
            }),
        }
    }

    /// Required signed integer
    pub fn int(&self, field: &str) -> Result<i64, MalformedRecord> {
        self.parse_required(field)
    }

    /// Required unsigned integer
    pub fn uint(&self, field: &str) -> Result<u64, MalformedRecord> {
        self.parse_required(field)
    }

    /// Required float
    pub fn float(&self, field: &str) -> Result<f64, MalformedRecord> {
        self.parse_required(field)
    }

    pub fn int_or(&self, field: &str, default: i64) -> i64 {
        self.parse_or(field, default)
    }

    pub fn float_or(&self, field: &str, default: f64) -> f64 {
        self.parse_or(field, default)
    }

    /// Required Unix timestamp (seconds)
    pub fn timestamp(&self, field: &str) -> Result<DateTime<Utc>, MalformedRecord> {
        let secs = self.int(field)?;
        DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| MalformedRecord::Invalid {
            field: field.to_string(),
            value: secs.to_string(),
        })
    }

    /// Optional Unix timestamp, epoch when absent or invalid
    pub fn timestamp_or_epoch(&self, field: &str) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.int_or(field, 0), 0).unwrap_or_default()
    }
}

impl From<HashMap<String, String>> for RawRecord {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Domain entities that can be built from a raw record.
pub trait FromRecord: Sized {
    /// Entity name for logs and metrics
    const KIND: &'static str;

    fn from_record(record: &RawRecord) -> Result<Self, MalformedRecord>;
}

/// Map every record, skipping the malformed ones.
///
/// Input order is kept. Each skipped record is logged with its `id` (when it
/// has one) and counted in `catalog_search_malformed_records_total`.
pub fn map_records<T: FromRecord>(records: &[RawRecord]) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| match T::from_record(record) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(
                    kind = T::KIND,
                    id = record.get("id").unwrap_or_default(),
                    error = %err,
                    "Skipping malformed record"
                );
                metrics::record_malformed(T::KIND);
                None
            }
        })
        .collect()
}
