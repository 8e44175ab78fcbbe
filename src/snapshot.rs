// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Reloadable reference data
//!
//! The category tree and the SEO table are read on every request and change
//! rarely. Each is held as an immutable value behind a [`Snapshot`]: readers
//! take an `Arc` and keep a consistent view for as long as they need it,
//! while a reload builds the next value off to the side and swaps it in.
//!
//! ```text
//! reload_tags() ── search tags ──→ TagTree::build ──→ Snapshot::store
//!                                                        │ (swap Arc)
//! request ── Snapshot::load ──→ Arc<TagTree> ────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::domain::{SeoContent, Tag};

/// Atomically replaceable shared value.
#[derive(Debug, Default)]
pub struct Snapshot<T> {
    current: RwLock<Arc<T>>,
}

impl<T> Snapshot<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(value)),
        }
    }

    /// Current value. The lock is only held for the `Arc` clone.
    pub fn load(&self) -> Arc<T> {
        self.current.read().clone()
    }

    /// Replace the value; readers holding the previous `Arc` are unaffected.
    pub fn store(&self, value: T) {
        *self.current.write() = Arc::new(value);
    }
}

/// A node of the category menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub key: String,
    pub label: String,
    pub image: String,
    pub branches: Vec<Leaf>,
}

impl Leaf {
    fn from_tag(tag: &Tag) -> Self {
        Self {
            key: tag.key.clone(),
            label: tag.label.clone(),
            image: tag.image.clone(),
            branches: Vec::new(),
        }
    }

    fn placeholder(key: &str) -> Self {
        Self {
            key: key.to_string(),
            label: String::new(),
            image: String::new(),
            branches: Vec::new(),
        }
    }
}

/// Three-level category menu: roots, their children, and grandchildren.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagTree {
    pub roots: Vec<Leaf>,
}

impl TagTree {
    /// Build the menu from every known tag.
    ///
    /// Roots are ordered by score (lowest first), then key. Children keep the
    /// order listed on their parent. A child key with no tag still appears,
    /// with an empty label.
    pub fn build(tags: &[Tag]) -> Self {
        let by_key: HashMap<&str, &Tag> = tags.iter().map(|t| (t.key.as_str(), t)).collect();

        let leaf = |key: &str| {
            by_key
                .get(key)
                .map(|tag| Leaf::from_tag(tag))
                .unwrap_or_else(|| Leaf::placeholder(key))
        };

        let mut roots: Vec<&Tag> = tags.iter().filter(|t| t.root).collect();
        roots.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.key.cmp(&b.key)));

        let roots = roots
            .into_iter()
            .map(|root| {
                let mut node = Leaf::from_tag(root);
                node.branches = root
                    .children
                    .iter()
                    .map(|child_key| {
                        let mut child = leaf(child_key.as_str());
                        if let Some(child_tag) = by_key.get(child_key.as_str()) {
                            child.branches = child_tag.children.iter().map(|k| leaf(k.as_str())).collect();
                        }
                        child
                    })
                    .collect();
                node
            })
            .collect();

        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a node at any depth
    pub fn find(&self, key: &str) -> Option<&Leaf> {
        fn walk<'a>(leaves: &'a [Leaf], key: &str) -> Option<&'a Leaf> {
            leaves
                .iter()
                .find_map(|leaf| (leaf.key == key).then_some(leaf).or_else(|| walk(&leaf.branches, key)))
        }
        walk(&self.roots, key)
    }
}

/// SEO content by page key, with the reverse path lookup used for routing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoTable {
    by_key: HashMap<String, SeoContent>,
    by_url: HashMap<String, String>,
}

impl SeoTable {
    pub fn build(contents: Vec<SeoContent>) -> Self {
        let mut table = Self::default();
        for content in contents {
            let path = content.url.trim().trim_matches('/');
            if !path.is_empty() {
                table.by_url.insert(path.to_string(), content.key.clone());
            }
            table.by_key.insert(content.key.clone(), content);
        }
        table
    }

    pub fn get(&self, key: &str) -> Option<&SeoContent> {
        self.by_key.get(key)
    }

    /// Public path of a page, if configured
    pub fn url(&self, key: &str) -> Option<&str> {
        self.get(key).map(|c| c.url.as_str()).filter(|u| !u.is_empty())
    }

    /// Page key serving a public path. Leading and trailing slashes are
    /// not significant.
    pub fn key_for_path(&self, path: &str) -> Option<&str> {
        self.by_url.get(path.trim().trim_matches('/')).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn tag(key: &str, children: &[&str], root: bool, score: i64) -> Tag {
        Tag {
            key: key.into(),
            label: key.to_uppercase(),
            image: String::new(),
            children: children.iter().map(|c| c.to_string()).collect(),
            root,
            score,
            updated_at: DateTime::default(),
        }
    }

    fn seo(key: &str, url: &str) -> SeoContent {
        SeoContent {
            key: key.into(),
            url: url.into(),
            title: key.into(),
            description: String::new(),
            updated_at: DateTime::default(),
        }
    }

    #[test]
    fn test_snapshot_swap_keeps_old_readers() {
        let snapshot = Snapshot::new(1);
        let before = snapshot.load();
        snapshot.store(2);
        assert_eq!(*before, 1);
        assert_eq!(*snapshot.load(), 2);
    }

    #[test]
    fn test_tree_three_levels() {
        let tags = vec![
            tag("shoes", &[], true, 2),
            tag("clothes", &["shirts", "pants"], true, 1),
            tag("shirts", &["polo"], false, 0),
            tag("pants", &[], false, 0),
            tag("polo", &[], false, 0),
        ];

        let tree = TagTree::build(&tags);
        let keys: Vec<&str> = tree.roots.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["clothes", "shoes"]);

        let clothes = &tree.roots[0];
        assert_eq!(clothes.branches.len(), 2);
        assert_eq!(clothes.branches[0].label, "SHIRTS");
        assert_eq!(clothes.branches[0].branches[0].key, "polo");
        assert!(tree.find("polo").is_some());
        assert!(tree.find("hats").is_none());
    }

    #[test]
    fn test_tree_missing_child_placeholder() {
        let tree = TagTree::build(&[tag("clothes", &["ghost"], true, 0)]);
        assert_eq!(tree.roots[0].branches[0].key, "ghost");
        assert_eq!(tree.roots[0].branches[0].label, "");
    }

    #[test]
    fn test_empty_tree() {
        assert!(TagTree::build(&[]).is_empty());
    }

    #[test]
    fn test_seo_table() {
        let table = SeoTable::build(vec![seo("products", "nos-produits"), seo("home", "")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.url("products"), Some("nos-produits"));
        assert_eq!(table.url("home"), None);
        assert_eq!(table.key_for_path("/nos-produits"), Some("products"));
        assert_eq!(table.key_for_path("/"), None);
    }
}
