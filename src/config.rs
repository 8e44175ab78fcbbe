// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for catalog search.
//!
//! # Example
//!
//! ```
//! use catalog_search::CatalogConfig;
//!
//! // Minimal config (uses defaults)
//! let config = CatalogConfig::default();
//! assert_eq!(config.items_per_page, 12);
//! assert_eq!(config.indexes.product, "product-idx");
//!
//! // From TOML, unset fields keep their defaults
//! let config = CatalogConfig::from_toml_str(r#"
//!     redis_url = "redis://localhost:6379"
//!     items_per_page = 24
//!
//!     [indexes]
//!     product = "shop-product-idx"
//! "#).unwrap();
//! assert_eq!(config.items_per_page, 24);
//! assert_eq!(config.indexes.product, "shop-product-idx");
//! assert_eq!(config.indexes.blog, "blog-idx");
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for catalog search.
///
/// All fields have defaults. Set `redis_url` to run against a live index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogConfig {
    /// Redis connection string (e.g., "redis://localhost:6379")
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Page size, shared by the search window and the display metadata
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u64,

    /// Per-query timeout in milliseconds (0 = none)
    #[serde(default)]
    pub query_timeout_ms: u64,

    /// Query dialect pinned on every FT.SEARCH
    #[serde(default = "default_dialect")]
    pub dialect: u32,

    /// Upper bound when listing a user's sessions
    #[serde(default = "default_session_limit")]
    pub session_limit: u64,

    /// Upper bound when loading tags, filters and SEO content into snapshots
    #[serde(default = "default_snapshot_limit")]
    pub snapshot_limit: u64,

    /// Base URL used to build product links
    #[serde(default)]
    pub website_url: String,

    #[serde(default)]
    pub indexes: IndexNames,
}

/// Index name per document kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexNames {
    pub product: String,
    pub blog: String,
    pub session: String,
    pub tag: String,
    pub filter: String,
    pub seo: String,
}

impl Default for IndexNames {
    fn default() -> Self {
        Self {
            product: "product-idx".into(),
            blog: "blog-idx".into(),
            session: "session-idx".into(),
            tag: "tag-idx".into(),
            filter: "filter-idx".into(),
            seo: "seo-idx".into(),
        }
    }
}

fn default_items_per_page() -> u64 { 12 }
fn default_dialect() -> u32 { 2 }
fn default_session_limit() -> u64 { 9999 }
fn default_snapshot_limit() -> u64 { 9999 }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            items_per_page: default_items_per_page(),
            query_timeout_ms: 0,
            dialect: default_dialect(),
            session_limit: default_session_limit(),
            snapshot_limit: default_snapshot_limit(),
            website_url: String::new(),
            indexes: IndexNames::default(),
        }
    }
}

impl CatalogConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_page == 0 {
            return Err(ConfigError::Invalid("items_per_page must be > 0".into()));
        }
        if self.dialect < 2 {
            return Err(ConfigError::Invalid("dialect must be >= 2".into()));
        }
        if self.session_limit == 0 || self.snapshot_limit == 0 {
            return Err(ConfigError::Invalid("session_limit and snapshot_limit must be > 0".into()));
        }
        let names = &self.indexes;
        for (kind, name) in [
            ("product", &names.product),
            ("blog", &names.blog),
            ("session", &names.session),
            ("tag", &names.tag),
            ("filter", &names.filter),
            ("seo", &names.seo),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("indexes.{kind} must not be empty")));
            }
        }
        Ok(())
    }

    /// Query timeout, if one is configured
    pub fn query_timeout(&self) -> Option<Duration> {
        (self.query_timeout_ms > 0).then(|| Duration::from_millis(self.query_timeout_ms))
    }
}
