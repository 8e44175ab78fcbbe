// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query compiler
//!
//! Turns a [`Query`] into the FT.SEARCH call for one [`SearchProfile`]:
//!
//! ```text
//! Query ──→ Expr (AST) ──→ RediSearchTranslator ──→ "(@status:{online} ...)"
//!   + Window ─────────────────────────────────────→ SORTBY .. LIMIT .. DIALECT 2
//! ```
//!
//! Compilation never fails. Criteria the profile has no field for are
//! skipped, and so are facet keys the compiler does not know.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use super::escape::ESCAPE_MARKER;
use super::index_manager::SearchFieldType;
use super::profile::{SearchProfile, ONLINE};
use super::query_builder::{Expr, ExprBuilder};
use super::redis_translator::RediSearchTranslator;
use crate::pagination::Window;
use crate::query::{Query, SearchScope};

/// Query dialect pinned on every call.
pub const DEFAULT_DIALECT: u32 = 2;

/// Join a facet key and value into the token stored in the facet field.
pub fn facet_token(key: &str, value: &str) -> String {
    format!("{key}_{value}")
}

/// Split raw keywords into terms. Any term may match.
///
/// An unpaired trailing backslash is dropped, since it would escape the
/// separator that follows the term in the expression.
pub fn keyword_terms(keywords: &str) -> Vec<String> {
    keywords
        .split_whitespace()
        .map(trim_dangling_marker)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

fn trim_dangling_marker(term: &str) -> &str {
    let trailing = term.chars().rev().take_while(|c| *c == ESCAPE_MARKER).count();
    if trailing % 2 == 1 {
        &term[..term.len() - ESCAPE_MARKER.len_utf8()]
    } else {
        term
    }
}

/// A ready-to-run FT.SEARCH call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub index: String,
    /// Expression AST, kept for backends that evaluate it directly
    pub expr: Expr,
    /// Escaped RediSearch expression
    pub expression: String,
    pub sort_field: String,
    pub window: Window,
    pub dialect: u32,
}

impl CompiledQuery {
    /// FT.SEARCH arguments, index name first.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.index.clone(),
            self.expression.clone(),
            "SORTBY".to_string(),
            self.sort_field.clone(),
            "DESC".to_string(),
            "LIMIT".to_string(),
            self.window.offset.to_string(),
            self.window.count().to_string(),
            "DIALECT".to_string(),
            self.dialect.to_string(),
        ]
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FT.SEARCH {} \"{}\" SORTBY {} DESC LIMIT {} {} DIALECT {}",
            self.index,
            self.expression,
            self.sort_field,
            self.window.offset,
            self.window.count(),
            self.dialect
        )
    }
}

/// Compiles queries. Holds the facet keys the catalog currently knows.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    known_facets: BTreeSet<String>,
    dialect: u32,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCompiler {
    pub fn new() -> Self {
        Self {
            known_facets: BTreeSet::new(),
            dialect: DEFAULT_DIALECT,
        }
    }

    pub fn with_dialect(mut self, dialect: u32) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_facets<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_facets = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn known_facets(&self) -> &BTreeSet<String> {
        &self.known_facets
    }

    pub fn is_known_facet(&self, key: &str) -> bool {
        self.known_facets.contains(key)
    }

    /// Compile `query` against `profile` for the given window.
    pub fn compile(&self, query: &Query, profile: &SearchProfile, window: Window) -> CompiledQuery {
        let expr = self.build_expr(query, profile);
        let expression = RediSearchTranslator::translate(&expr);

        let compiled = CompiledQuery {
            index: profile.index.clone(),
            expr,
            expression,
            sort_field: profile.sort_field.to_string(),
            window,
            dialect: self.dialect,
        };

        debug!(profile = profile.name, query = %compiled, "Compiled search query");
        compiled
    }

    fn build_expr(&self, query: &Query, profile: &SearchProfile) -> Expr {
        let mut builder = ExprBuilder::new();

        if query.scope == SearchScope::Public {
            if let Some(field) = profile.status_field {
                builder = builder.tags(field, vec![ONLINE.to_string()]);
            }
        }

        if let Some(field) = profile.type_field {
            let kind = query
                .kind
                .as_deref()
                .filter(|k| !k.is_empty())
                .or(profile.default_type);
            if let Some(kind) = kind {
                builder = builder.tags(field, vec![kind.to_string()]);
            }
        }

        let terms = keyword_terms(&query.keywords);
        if !terms.is_empty() && !profile.keyword_fields.is_empty() {
            let keywords = profile
                .keyword_fields
                .iter()
                .fold(ExprBuilder::new(), |any, field| match field.kind {
                    SearchFieldType::Tag => any.tags(field.name, terms.clone()),
                    _ => any.terms(field.name, terms.clone()),
                })
                .build_or();
            builder = builder.node(keywords);
        }

        if !query.slug.is_empty() {
            if let Some(field) = profile.slug_field {
                builder = builder.tags(field, vec![query.slug.clone()]);
            }
        }

        if !query.tags.is_empty() {
            if let Some(field) = profile.tag_field {
                builder = builder.tags(field, query.tags.iter().cloned().collect());
            }
        }

        if let Some(field) = profile.facet_field {
            for (key, values) in &query.facets {
                if values.is_empty() {
                    continue;
                }
                if !self.is_known_facet(key) {
                    debug!(facet = %key, "Ignoring unknown facet");
                    continue;
                }
                let tokens = values.iter().map(|v| facet_token(key, v)).collect();
                builder = builder.tags(field, tokens);
            }
        }

        if query.price_min.is_some() || query.price_max.is_some() {
            if let Some(field) = profile.price_field {
                builder = builder.numeric_range(field, query.price_min, query.price_max);
            }
        }

        if let Some(locale) = query.locale.as_deref().filter(|l| !l.is_empty()) {
            if let Some(field) = profile.locale_field {
                builder = builder.tags(field, vec![locale.to_string()]);
            }
        }

        if let Some(uid) = query.owner {
            if let Some(field) = profile.owner_field {
                builder = builder.tags(field, vec![uid.to_string()]);
            }
        }

        builder.build_and()
    }
}
