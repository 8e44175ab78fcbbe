// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::Searchable;
use crate::config::CatalogConfig;
use crate::mapper::{FromRecord, MalformedRecord, RawRecord};
use crate::search::{KeywordField, SearchIndex, SearchProfile};

/// Blog posts and CMS pages share one index, told apart by `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    #[default]
    Blog,
    Cms,
}

impl ArticleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Cms => "cms",
        }
    }
}

/// A blog post or CMS page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub status: String,
    /// Image path
    pub image: String,
    pub kind: ArticleKind,
    pub lang: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Only blog posts can be deleted; CMS pages are fixed.
    pub fn is_deletable(&self) -> bool {
        self.kind == ArticleKind::Blog
    }
}

impl FromRecord for Article {
    const KIND: &'static str = "article";

    fn from_record(record: &RawRecord) -> Result<Self, MalformedRecord> {
        let kind = match record.get("type").unwrap_or_default() {
            "cms" => ArticleKind::Cms,
            "blog" | "" => ArticleKind::Blog,
            other => {
                warn!(kind = other, "Unknown article type, treating as blog");
                ArticleKind::Blog
            }
        };

        Ok(Self {
            id: record.uint("id")?,
            title: record.text("title"),
            description: record.text("description"),
            slug: record.text("slug"),
            status: record.raw("status"),
            image: record.raw("image"),
            kind,
            lang: record.raw("lang"),
            created_at: record.timestamp_or_epoch("created_at"),
            updated_at: record.timestamp("updated_at")?,
        })
    }
}

impl Searchable for Article {
    fn profile(config: &CatalogConfig) -> SearchProfile {
        SearchProfile::new(Self::KIND, &config.indexes.blog)
            .with_status("status")
            .with_type("type", Some(ArticleKind::Blog.as_str()))
            .with_keywords(vec![
                KeywordField::text("title"),
                KeywordField::text("description"),
                KeywordField::tag("id"),
            ])
            .with_slug("slug")
            .with_locale("lang")
    }

    fn index(config: &CatalogConfig) -> SearchIndex {
        SearchIndex::new(&config.indexes.blog, "blog:")
            .text("title")
            .text("description")
            .tag("id")
            .tag("slug")
            .tag("status")
            .tag("type")
            .tag("lang")
            .numeric_sortable("updated_at")
    }
}
