// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::{parse_meta, Meta, Searchable};
use crate::config::CatalogConfig;
use crate::mapper::{FromRecord, MalformedRecord, RawRecord};
use crate::search::{KeywordField, SearchIndex, SearchProfile};

const IMAGE_FIELDS: [&str; 4] = ["image_1", "image_2", "image_3", "image_4"];

/// Publication status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Online,
    #[default]
    Offline,
}

impl ProductStatus {
    fn parse(value: &str) -> Self {
        match value {
            "online" => Self::Online,
            "offline" => Self::Offline,
            other => {
                warn!(status = other, "Unknown product status, treating as offline");
                Self::Offline
            }
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Percent discount
    pub discount: f64,
    pub slug: String,
    /// Merchant id
    pub mid: String,
    pub sku: String,
    pub quantity: i64,
    pub status: ProductStatus,
    pub weight: f64,
    /// Image paths, empty slots skipped
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub meta: Meta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Public link: `{base}/{id}-{slug}.html`
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}-{}.html", base.trim_end_matches('/'), self.id, self.slug)
    }

    /// Price after discount
    pub fn discounted_price(&self) -> f64 {
        if self.discount > 0.0 {
            self.price * (100.0 - self.discount) / 100.0
        } else {
            self.price
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == ProductStatus::Online
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

impl FromRecord for Product {
    const KIND: &'static str = "product";

    fn from_record(record: &RawRecord) -> Result<Self, MalformedRecord> {
        Ok(Self {
            id: record.required("id")?.to_string(),
            title: record.text("title"),
            description: record.text("description"),
            price: record.float("price")?,
            discount: record.float_or("discount", 0.0),
            slug: record.text("slug"),
            mid: record.raw("mid"),
            sku: record.text("sku"),
            quantity: record.int("quantity")?,
            status: ProductStatus::parse(&record.raw("status")),
            weight: record.float_or("weight", 0.0),
            images: IMAGE_FIELDS
                .iter()
                .map(|field| record.raw(field))
                .filter(|path| !path.is_empty())
                .collect(),
            tags: record.list("tags"),
            meta: parse_meta(&record.text("meta")),
            created_at: record.timestamp_or_epoch("created_at"),
            updated_at: record.timestamp("updated_at")?,
        })
    }
}

impl Searchable for Product {
    fn profile(config: &CatalogConfig) -> SearchProfile {
        SearchProfile::new(Self::KIND, &config.indexes.product)
            .with_status("status")
            .with_type("type", Some("product"))
            .with_keywords(vec![
                KeywordField::text("title"),
                KeywordField::text("description"),
                KeywordField::tag("sku"),
                KeywordField::tag("id"),
            ])
            .with_slug("slug")
            .with_tags("tags")
            .with_facets("meta")
            .with_price("price")
    }

    fn index(config: &CatalogConfig) -> SearchIndex {
        SearchIndex::new(&config.indexes.product, "product:")
            .text("title")
            .text("description")
            .tag("id")
            .tag("sku")
            .tag("slug")
            .tag("status")
            .tag("type")
            .tag("tags")
            .tag("meta")
            .numeric_sortable("price")
            .numeric("quantity")
            .numeric_sortable("updated_at")
    }
}
