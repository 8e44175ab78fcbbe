// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! In-memory search backend.
//!
//! Evaluates the compiled expression tree against stored hashes, the way
//! RediSearch would for the subset of syntax the compiler emits:
//!
//! - TEXT terms match case-insensitively on word tokens
//! - TAG values match case-insensitively on whole `;`-separated values
//! - numeric ranges are inclusive
//!
//! Results are sorted by the sort field (descending, missing values last)
//! and then by key, so paging is stable.

use std::cmp::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use super::traits::{BackendError, SearchBackend, SearchReply};
use crate::mapper::RawRecord;
use crate::search::{
    unescape, CompiledQuery, ExprNode, FieldOperator, FieldQuery, QueryValue, SearchIndex, TAG_SEPARATOR,
};

pub struct InMemoryBackend {
    indexes: DashMap<String, SearchIndex>,
    documents: DashMap<String, RawRecord>,
    failure: Mutex<Option<BackendError>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            indexes: DashMap::new(),
            documents: DashMap::new(),
            failure: Mutex::new(None),
        }
    }

    /// Store a document under `key` (e.g. `product:42`), replacing any previous one.
    pub fn insert(&self, key: impl Into<String>, record: RawRecord) {
        self.documents.insert(key.into(), record);
    }

    pub fn remove(&self, key: &str) -> Option<RawRecord> {
        self.documents.remove(key).map(|(_, record)| record)
    }

    /// Get current document count
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Clear all documents (indexes are kept)
    pub fn clear(&self) {
        self.documents.clear();
    }

    /// Make every following call fail with `error`, or succeed again with `None`.
    pub fn set_failure(&self, error: Option<BackendError>) {
        *self.failure.lock() = error;
    }

    fn check_failure(&self) -> Result<(), BackendError> {
        match self.failure.lock().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchBackend for InMemoryBackend {
    async fn execute(&self, query: &CompiledQuery) -> Result<SearchReply, BackendError> {
        self.check_failure()?;

        let index = self
            .indexes
            .get(&query.index)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| BackendError::Engine(format!("{}: no such index", query.index)))?;

        let mut hits: Vec<(String, RawRecord)> = self
            .documents
            .iter()
            .filter(|entry| index.covers(entry.key()))
            .filter(|entry| matches(&query.expr.root, entry.value()))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let sort_key = |record: &RawRecord| -> Option<f64> {
            record.get(&query.sort_field).and_then(|v| v.trim().parse().ok())
        };
        hits.sort_by(|(ka, a), (kb, b)| {
            match (sort_key(a), sort_key(b)) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| ka.cmp(kb))
        });

        let total = hits.len() as u64;
        let records = hits
            .into_iter()
            .skip(query.window.offset as usize)
            .take(query.window.count() as usize)
            .map(|(_, record)| record)
            .collect();

        Ok(SearchReply { total, records })
    }

    async fn create_index(&self, index: &SearchIndex) -> Result<(), BackendError> {
        self.check_failure()?;
        self.indexes
            .entry(index.name.clone())
            .or_insert_with(|| index.clone());
        Ok(())
    }
}

fn matches(node: &ExprNode, record: &RawRecord) -> bool {
    match node {
        ExprNode::MatchAll => true,
        ExprNode::Field(field) => matches_field(field, record),
        ExprNode::And(nodes) => nodes.iter().all(|n| matches(n, record)),
        ExprNode::Or(nodes) => nodes.iter().any(|n| matches(n, record)),
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matches_field(field: &FieldQuery, record: &RawRecord) -> bool {
    let Some(stored) = record.get(&field.field) else {
        return false;
    };

    match (&field.operator, &field.value) {
        (FieldOperator::Matches, QueryValue::Terms(terms)) => {
            let stored_words = words(&unescape(stored));
            terms.iter().any(|term| {
                let term_words = words(term);
                !term_words.is_empty() && term_words.iter().all(|w| stored_words.contains(w))
            })
        }
        (FieldOperator::In, QueryValue::Tags(tags)) => {
            let stored = unescape(stored);
            stored
                .split(TAG_SEPARATOR)
                .map(str::trim)
                .any(|value| tags.iter().any(|tag| tag.eq_ignore_ascii_case(value)))
        }
        (FieldOperator::Range, QueryValue::NumericRange { min, max }) => {
            match stored.trim().parse::<f64>() {
                Ok(value) => {
                    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
                }
                Err(_) => false,
            }
        }
        _ => false,
    }
}
