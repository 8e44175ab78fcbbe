// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Infrastructure
//!
//! Compiles catalog queries into RediSearch FT.SEARCH calls.
//!
//! # Architecture
//!
//! ```text
//! Query + SearchProfile
//!     ↓ QueryCompiler
//! Expr (AST)
//!     ↓ RediSearchTranslator (escapes every value)
//! CompiledQuery { expression, SORTBY, LIMIT, DIALECT }
//! ```
//!
//! # Example
//!
//! ```rust
//! use catalog_search::search::{KeywordField, QueryCompiler, SearchProfile};
//! use catalog_search::{Paginator, Query};
//!
//! let profile = SearchProfile::new("product", "product-idx")
//!     .with_status("status")
//!     .with_type("type", Some("product"))
//!     .with_keywords(vec![KeywordField::text("title")])
//!     .with_price("price");
//!
//! let query = Query::keywords("scarf").with_price(None, Some(40.0));
//! let window = Paginator::new(2, 12).window();
//! let compiled = QueryCompiler::new().compile(&query, &profile, window);
//!
//! assert_eq!(
//!     compiled.expression,
//!     "(@status:{online} @type:{product} @title:scarf @price:[-inf 40])"
//! );
//! assert_eq!(&compiled.to_args()[5..8], ["LIMIT", "12", "12"]);
//! ```
//!
//! # Query Language (RediSearch syntax)
//!
//! ```text
//! @title:scarf              - Full-text term
//! @title:(wool|scarf)       - Any term
//! @price:[25 40]            - Numeric range
//! @tags:{mens|shoes}        - Tag membership (OR)
//! @a:x @b:y                 - Boolean AND
//! @a:x | @b:y               - Boolean OR
//! ```

mod compiler;
mod escape;
mod index_manager;
mod profile;
mod query_builder;
mod redis_translator;

pub use compiler::{facet_token, keyword_terms, CompiledQuery, QueryCompiler, DEFAULT_DIALECT};
pub use escape::{escape, escape_tag, is_reserved, unescape, ESCAPE_MARKER};
pub use index_manager::{IndexManager, SearchField, SearchFieldType, SearchIndex, TAG_SEPARATOR};
pub use profile::{KeywordField, SearchProfile, ONLINE};
pub use query_builder::{Expr, ExprBuilder, ExprNode, FieldOperator, FieldQuery, QueryValue};
pub use redis_translator::RediSearchTranslator;
