// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Public path resolution
//!
//! Page paths are editable from the back-office (SEO content), so they are
//! never baked into a route table. A [`Router`] is a view over one SEO
//! snapshot and resolves a path to a stable [`RouteTarget`]:
//!
//! | Path                       | Target                          |
//! |----------------------------|---------------------------------|
//! | `/`                        | [`RouteTarget::Home`]           |
//! | `/blog`                    | [`RouteTarget::Blog`]           |
//! | `/blog/{slug}`             | [`RouteTarget::Article`]        |
//! | `.../{id}-{slug}.html`     | [`RouteTarget::Product`]        |
//! | any SEO url                | [`RouteTarget::Page`]           |
//!
//! SEO urls win over the fixed shapes, except for `/`.

use std::sync::Arc;

use crate::snapshot::SeoTable;

const PRODUCT_SUFFIX: &str = ".html";
const BLOG_ROOT: &str = "/blog";

/// What a public path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Home,
    Blog,
    Article { slug: String },
    Product { id: String, slug: String },
    /// SEO-managed page, by content key
    Page { key: String },
    NotFound,
}

/// Path resolver over one SEO snapshot.
#[derive(Debug, Clone)]
pub struct Router {
    seo: Arc<SeoTable>,
}

impl Router {
    pub fn new(seo: Arc<SeoTable>) -> Self {
        Self { seo }
    }

    /// Resolve a request path. The query string, if any, is ignored.
    pub fn resolve(&self, path: &str) -> RouteTarget {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = normalize(path);

        if path == "/" {
            return RouteTarget::Home;
        }

        if let Some(key) = self.seo.key_for_path(&path) {
            return RouteTarget::Page { key: key.to_string() };
        }

        if path == BLOG_ROOT {
            return RouteTarget::Blog;
        }

        if let Some(slug) = path.strip_prefix(BLOG_ROOT).and_then(|rest| rest.strip_prefix('/')) {
            if !slug.is_empty() && !slug.contains('/') {
                return RouteTarget::Article { slug: slug.to_string() };
            }
        }

        match parse_product_path(&path) {
            Some((id, slug)) => RouteTarget::Product { id, slug },
            None => RouteTarget::NotFound,
        }
    }

    /// Public path of an SEO-managed page
    pub fn url_for(&self, key: &str) -> Option<&str> {
        self.seo.url(key)
    }
}

/// Leading slash, no trailing slash.
fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{trimmed}")
}

/// Split the last segment of `.../{id}-{slug}.html`.
pub fn parse_product_path(path: &str) -> Option<(String, String)> {
    let segment = path.rsplit('/').next()?;
    let stem = segment.strip_suffix(PRODUCT_SUFFIX)?;
    let (id, slug) = stem.split_once('-')?;

    if id.is_empty() || slug.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some((id.to_string(), slug.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeoContent;
    use chrono::DateTime;

    fn router() -> Router {
        let page = |key: &str, url: &str| SeoContent {
            key: key.into(),
            url: url.into(),
            title: String::new(),
            description: String::new(),
            updated_at: DateTime::default(),
        };
        Router::new(Arc::new(SeoTable::build(vec![
            page("about", "/a-propos"),
            page("categories", "/categories"),
        ])))
    }

    #[test]
    fn test_fixed_routes() {
        let router = router();
        assert_eq!(router.resolve("/"), RouteTarget::Home);
        assert_eq!(router.resolve(""), RouteTarget::Home);
        assert_eq!(router.resolve("/blog/"), RouteTarget::Blog);
        assert_eq!(
            router.resolve("/blog/winter-care?ref=home"),
            RouteTarget::Article { slug: "winter-care".into() }
        );
    }

    #[test]
    fn test_product_path() {
        let router = router();
        assert_eq!(
            router.resolve("/products/PDT42-wool-scarf.html"),
            RouteTarget::Product { id: "PDT42".into(), slug: "wool-scarf".into() }
        );
        assert_eq!(router.resolve("/products/wool.html"), RouteTarget::NotFound);
        assert_eq!(router.resolve("/products/-scarf.html"), RouteTarget::NotFound);
    }

    #[test]
    fn test_seo_pages() {
        let router = router();
        assert_eq!(router.resolve("/a-propos/"), RouteTarget::Page { key: "about".into() });
        assert_eq!(router.url_for("categories"), Some("/categories"));
        assert_eq!(router.url_for("terms"), None);
        assert_eq!(router.resolve("/terms"), RouteTarget::NotFound);
    }

    #[test]
    fn test_product_url_round_trip() {
        let url = "https://shop.example/PDT1-t-shirt.html";
        assert_eq!(parse_product_path(url), Some(("PDT1".into(), "t-shirt".into())));
    }
}
