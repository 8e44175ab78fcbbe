// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Builder - AST for search expressions
//!
//! The compiler lowers a catalog [`crate::Query`] into this tree. Values are
//! kept unescaped here; escaping happens when the tree is translated to
//! RediSearch syntax, and the in-memory backend evaluates the tree directly.
//!
//! # Example
//!
//! ```rust
//! use catalog_search::search::{Expr, ExprBuilder};
//!
//! // Any-field keyword match
//! let keywords = Expr::terms("title", vec!["wool".into()])
//!     .or(Expr::terms("description", vec!["wool".into()]));
//!
//! // Conjunction of clauses
//! let expr = ExprBuilder::new()
//!     .tags("status", vec!["online".into()])
//!     .node(keywords)
//!     .numeric_range("price", Some(10.0), None)
//!     .build_and();
//! ```

use serde::{Deserialize, Serialize};

/// Search expression AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Root node
    pub root: ExprNode,
}

impl Expr {
    /// Create an expression from a root node
    pub fn new(root: ExprNode) -> Self {
        Self { root }
    }

    /// Match every document in the index: `*`
    pub fn match_all() -> Self {
        Self::new(ExprNode::MatchAll)
    }

    /// Full-text match on any of the terms: `@field:(a|b)`
    pub fn terms(field: impl Into<String>, terms: Vec<String>) -> Self {
        Self::new(ExprNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::Matches,
            value: QueryValue::Terms(terms),
        }))
    }

    /// Tag membership: `@field:{a|b}`
    pub fn tags(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(ExprNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::In,
            value: QueryValue::Tags(values),
        }))
    }

    /// Numeric range, open ends as `None`: `@field:[min max]`
    pub fn numeric_range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(ExprNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::Range,
            value: QueryValue::NumericRange { min, max },
        }))
    }

    /// Combine with AND
    pub fn and(self, other: Expr) -> Self {
        Self::new(ExprNode::And(vec![self.root, other.root]))
    }

    /// Combine with OR
    pub fn or(self, other: Expr) -> Self {
        Self::new(ExprNode::Or(vec![self.root, other.root]))
    }
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprNode {
    /// Every document: `*`
    MatchAll,
    /// Field clause
    Field(FieldQuery),
    /// Boolean AND: `(a b)`
    And(Vec<ExprNode>),
    /// Boolean OR: `(a | b)`
    Or(Vec<ExprNode>),
}

/// Field clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldQuery {
    /// Index field name (e.g. "title", "tags", "price")
    pub field: String,
    /// Comparison operator
    pub operator: FieldOperator,
    /// Unescaped value
    pub value: QueryValue,
}

/// Field comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldOperator {
    /// Full-text term match on a TEXT field
    Matches,
    /// Membership on a TAG field
    In,
    /// Numeric range on a NUMERIC field
    Range,
}

/// Clause value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryValue {
    /// Text terms (OR semantics)
    Terms(Vec<String>),
    /// Tag values (OR semantics)
    Tags(Vec<String>),
    /// Inclusive numeric range
    NumericRange { min: Option<f64>, max: Option<f64> },
}

/// Builder collecting clauses into one AND / OR node
#[derive(Debug, Default)]
pub struct ExprBuilder {
    nodes: Vec<ExprNode>,
}

impl ExprBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add an arbitrary sub-expression
    pub fn node(mut self, expr: Expr) -> Self {
        self.nodes.push(expr.root);
        self
    }

    /// Add a full-text clause
    pub fn terms(self, field: impl Into<String>, terms: Vec<String>) -> Self {
        self.node(Expr::terms(field, terms))
    }

    /// Add a tag clause
    pub fn tags(self, field: impl Into<String>, values: Vec<String>) -> Self {
        self.node(Expr::tags(field, values))
    }

    /// Add a numeric range clause
    pub fn numeric_range(self, field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        self.node(Expr::numeric_range(field, min, max))
    }

    /// Number of clauses collected so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no clause was added
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build with AND semantics (all clauses must match)
    pub fn build_and(self) -> Expr {
        Self::collapse(self.nodes, ExprNode::And)
    }

    /// Build with OR semantics (any clause can match)
    pub fn build_or(self) -> Expr {
        Self::collapse(self.nodes, ExprNode::Or)
    }

    fn collapse(mut nodes: Vec<ExprNode>, combine: fn(Vec<ExprNode>) -> ExprNode) -> Expr {
        match nodes.len() {
            // Empty expression matches everything
            0 => Expr::match_all(),
            1 => Expr::new(nodes.remove(0)),
            _ => Expr::new(combine(nodes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_query() {
        let expr = Expr::terms("title", vec!["wool".to_string()]);
        assert_eq!(
            expr.root,
            ExprNode::Field(FieldQuery {
                field: "title".to_string(),
                operator: FieldOperator::Matches,
                value: QueryValue::Terms(vec!["wool".to_string()]),
            })
        );
    }

    #[test]
    fn test_tag_query() {
        let expr = Expr::tags("tags", vec!["mens".to_string(), "shoes".to_string()]);

        match expr.root {
            ExprNode::Field(FieldQuery { field, operator, value }) => {
                assert_eq!(field, "tags");
                assert_eq!(operator, FieldOperator::In);
                assert_eq!(value, QueryValue::Tags(vec!["mens".to_string(), "shoes".to_string()]));
            }
            _ => panic!("Expected Field node"),
        }
    }

    #[test]
    fn test_and_or() {
        let expr = Expr::tags("status", vec!["online".into()])
            .and(Expr::numeric_range("price", Some(10.0), Some(20.0)));
        match expr.root {
            ExprNode::And(nodes) => assert_eq!(nodes.len(), 2),
            _ => panic!("Expected And node"),
        }

        let expr = Expr::terms("title", vec!["a".into()]).or(Expr::terms("description", vec!["a".into()]));
        match expr.root {
            ExprNode::Or(nodes) => assert_eq!(nodes.len(), 2),
            _ => panic!("Expected Or node"),
        }
    }

    #[test]
    fn test_builder_and() {
        let expr = ExprBuilder::new()
            .tags("status", vec!["online".into()])
            .tags("type", vec!["product".into()])
            .numeric_range("price", None, Some(40.0))
            .build_and();

        match expr.root {
            ExprNode::And(nodes) => assert_eq!(nodes.len(), 3),
            _ => panic!("Expected And node"),
        }
    }

    #[test]
    fn test_builder_single_clause_is_unwrapped() {
        let expr = ExprBuilder::new().tags("type", vec!["blog".into()]).build_or();
        assert!(matches!(expr.root, ExprNode::Field(_)));
    }

    #[test]
    fn test_empty_builder_matches_all() {
        assert_eq!(ExprBuilder::new().build_and().root, ExprNode::MatchAll);
        assert_eq!(ExprBuilder::new().build_or().root, ExprNode::MatchAll);
    }
}
