// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! # Catalog Search
//!
//! The search core of a storefront and its back-office: products, blog and
//! CMS articles, category tags, facet filters, SEO pages and user sessions,
//! all stored as Redis hashes and indexed by RediSearch.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Request handler                        │
//! │  • QueryParams → Query (lenient or strict)                  │
//! │  • Paginator: page → offset/limit window                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Query compiler                         │
//! │  • Escaped RediSearch expression per entity profile         │
//! │  • Unknown facets ignored, output deterministic             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Search backend                         │
//! │  • RediSearch (FT.SEARCH) or in-memory evaluation           │
//! │  • Optional per-query timeout, no retries                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Result mapper                          │
//! │  • RawRecord → Product / Article / Tag / ...                │
//! │  • Malformed records logged, counted and skipped            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                  SearchResult<T> + Pagination
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use catalog_search::{Catalog, CatalogConfig, Product, QueryParams, ParseMode};
//! use catalog_search::storage::redis::RedisSearchBackend;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CatalogConfig::load("catalog.toml")?;
//!     let url = config.redis_url.clone().unwrap_or_else(|| "redis://localhost:6379".into());
//!     let backend = RedisSearchBackend::connect(&url).await?;
//!
//!     let catalog = Catalog::new(config, Arc::new(backend));
//!     catalog.create_indexes().await?;
//!     catalog.reload_facets().await?;
//!
//!     let params = QueryParams::from_pairs([("q", "scarf"), ("color", "blue"), ("page", "2")]);
//!     let paginator = params.paginator(catalog.config().items_per_page);
//!     let query = params.to_query(ParseMode::Lenient)?;
//!
//!     let result = catalog.search::<Product>(&query, &paginator).await?;
//!     let pagination = result.pagination(&paginator);
//!     println!("{}-{} of {}", pagination.start, pagination.end, pagination.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: The [`Catalog`] facade tying the flow together
//! - [`search`]: Escaping, query AST and compilation, index schemas
//! - [`storage`]: Search backends (RediSearch, in-memory)
//! - [`mapper`]: Tolerant record mapping
//! - [`domain`]: Catalog entities and their search profiles
//! - [`pagination`]: Windows and display metadata
//! - [`snapshot`]: Reloadable category tree and SEO table
//! - [`routing`]: Public path resolution
//! - [`resilience`]: Retry for the initial connection

pub mod catalog;
pub mod config;
pub mod domain;
pub mod mapper;
pub mod metrics;
pub mod pagination;
pub mod params;
pub mod query;
pub mod resilience;
pub mod routing;
pub mod search;
pub mod snapshot;
pub mod storage;

// Note: We don't expose a `tracing` module to avoid conflict with the tracing crate

pub use catalog::{Catalog, SearchError, SearchResult};
pub use config::{CatalogConfig, ConfigError, IndexNames};
pub use domain::{Article, ArticleKind, Filter, Product, ProductStatus, Searchable, SeoContent, Session, Tag};
pub use mapper::{map_records, FromRecord, MalformedRecord, RawRecord};
pub use metrics::LatencyTimer;
pub use pagination::{Pagination, Paginator, Window};
pub use params::{ParseMode, QueryParams, ValidationError};
pub use query::{Query, SearchScope};
pub use resilience::retry::RetryConfig;
pub use routing::{RouteTarget, Router};
pub use search::{CompiledQuery, QueryCompiler};
pub use snapshot::{Leaf, SeoTable, Snapshot, TagTree};
pub use storage::traits::{BackendError, SearchBackend, SearchReply};
