// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! RediSearch Translator
//!
//! Translates the expression AST to RediSearch FT.SEARCH query syntax.
//!
//! # RediSearch Query Syntax
//!
//! ```text
//! *                         - Match all
//! @field:term               - Full-text term
//! @field:(a|b)              - Any of the terms
//! @field:{a|b}              - Tag membership
//! @field:[min max]          - Numeric range (-inf / +inf for open ends)
//! query1 query2             - AND (implicit)
//! query1 | query2           - OR
//! (query1 query2)           - Grouping
//! ```

use tracing::warn;

use super::escape::{escape, escape_tag};
use super::query_builder::{Expr, ExprNode, FieldOperator, FieldQuery, QueryValue};

const MATCH_ALL: &str = "*";

/// RediSearch query translator
pub struct RediSearchTranslator;

impl RediSearchTranslator {
    /// Translate an expression to RediSearch FT.SEARCH syntax
    pub fn translate(expr: &Expr) -> String {
        Self::translate_node(&expr.root)
    }

    fn translate_node(node: &ExprNode) -> String {
        match node {
            ExprNode::MatchAll => MATCH_ALL.to_string(),
            ExprNode::Field(field_query) => Self::translate_field(field_query),
            ExprNode::And(nodes) => {
                // `*` adds nothing to a conjunction
                let parts: Vec<String> = nodes
                    .iter()
                    .map(Self::translate_node)
                    .filter(|part| part != MATCH_ALL)
                    .collect();
                match parts.len() {
                    0 => MATCH_ALL.to_string(),
                    1 => parts[0].clone(),
                    _ => format!("({})", parts.join(" ")),
                }
            }
            ExprNode::Or(nodes) => {
                let parts: Vec<String> = nodes.iter().map(Self::translate_node).collect();
                if parts.iter().any(|part| part == MATCH_ALL) {
                    return MATCH_ALL.to_string();
                }
                match parts.len() {
                    0 => MATCH_ALL.to_string(),
                    1 => parts[0].clone(),
                    _ => format!("({})", parts.join(" | ")),
                }
            }
        }
    }

    fn translate_field(field: &FieldQuery) -> String {
        match (&field.operator, &field.value) {
            (FieldOperator::Matches, QueryValue::Terms(terms)) => {
                let escaped: Vec<String> = terms.iter().map(|t| escape(t)).collect();
                match escaped.len() {
                    0 => MATCH_ALL.to_string(),
                    1 => format!("@{}:{}", field.field, escaped[0]),
                    _ => format!("@{}:({})", field.field, escaped.join("|")),
                }
            }
            (FieldOperator::In, QueryValue::Tags(tags)) => {
                if tags.is_empty() {
                    return MATCH_ALL.to_string();
                }
                let tag_str = tags
                    .iter()
                    .map(|t| escape_tag(t))
                    .collect::<Vec<_>>()
                    .join("|");
                format!("@{}:{{{}}}", field.field, tag_str)
            }
            (FieldOperator::Range, QueryValue::NumericRange { min, max }) => {
                let min_str = min.map(|v| v.to_string()).unwrap_or_else(|| "-inf".to_string());
                let max_str = max.map(|v| v.to_string()).unwrap_or_else(|| "+inf".to_string());
                format!("@{}:[{} {}]", field.field, min_str, max_str)
            }
            (operator, value) => {
                warn!(field = %field.field, ?operator, ?value, "Unsupported clause, matching all");
                MATCH_ALL.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ExprBuilder;

    #[test]
    fn test_match_all() {
        assert_eq!(RediSearchTranslator::translate(&Expr::match_all()), "*");
    }

    #[test]
    fn test_single_term() {
        let expr = Expr::terms("title", vec!["wool".into()]);
        assert_eq!(RediSearchTranslator::translate(&expr), "@title:wool");
    }

    #[test]
    fn test_multiple_terms() {
        let expr = Expr::terms("title", vec!["wool".into(), "scarf".into()]);
        assert_eq!(RediSearchTranslator::translate(&expr), "@title:(wool|scarf)");
    }

    #[test]
    fn test_numeric_range() {
        let expr = Expr::numeric_range("price", Some(25.0), Some(40.5));
        assert_eq!(RediSearchTranslator::translate(&expr), "@price:[25 40.5]");
    }

    #[test]
    fn test_numeric_range_unbounded() {
        let expr = Expr::numeric_range("price", None, Some(40.0));
        assert_eq!(RediSearchTranslator::translate(&expr), "@price:[-inf 40]");

        let expr = Expr::numeric_range("price", Some(100.0), None);
        assert_eq!(RediSearchTranslator::translate(&expr), "@price:[100 +inf]");
    }

    #[test]
    fn test_tag_query() {
        let expr = Expr::tags("tags", vec!["mens".into(), "shoes".into()]);
        assert_eq!(RediSearchTranslator::translate(&expr), "@tags:{mens|shoes}");
    }

    #[test]
    fn test_tag_values_escaped() {
        let expr = Expr::tags("slug", vec!["t-shirt tester".into()]);
        assert_eq!(RediSearchTranslator::translate(&expr), "@slug:{t\\-shirt\\ tester}");
    }

    #[test]
    fn test_and_query() {
        let expr = Expr::tags("status", vec!["online".into()])
            .and(Expr::numeric_range("price", Some(25.0), Some(40.0)));
        assert_eq!(
            RediSearchTranslator::translate(&expr),
            "(@status:{online} @price:[25 40])"
        );
    }

    #[test]
    fn test_or_query() {
        let expr = Expr::terms("title", vec!["wool".into()])
            .or(Expr::terms("description", vec!["wool".into()]));
        assert_eq!(
            RediSearchTranslator::translate(&expr),
            "(@title:wool | @description:wool)"
        );
    }

    #[test]
    fn test_match_all_absorbed_in_and() {
        let expr = ExprBuilder::new()
            .node(Expr::match_all())
            .tags("type", vec!["session".into()])
            .build_and();
        assert_eq!(RediSearchTranslator::translate(&expr), "@type:{session}");
    }

    #[test]
    fn test_escape_special_chars() {
        let expr = Expr::terms("title", vec!["user@example.com".into()]);
        assert_eq!(RediSearchTranslator::translate(&expr), "@title:user\\@example\\.com");
    }

    #[test]
    fn test_escape_colon() {
        let expr = Expr::terms("title", vec!["12:30".into()]);
        assert_eq!(RediSearchTranslator::translate(&expr), "@title:12\\:30");
    }

    #[test]
    fn test_nested_query() {
        let keywords = ExprBuilder::new()
            .terms("title", vec!["scarf".into()])
            .tags("sku", vec!["scarf".into()])
            .build_or();
        let expr = ExprBuilder::new()
            .tags("status", vec!["online".into()])
            .node(keywords)
            .build_and();

        assert_eq!(
            RediSearchTranslator::translate(&expr),
            "(@status:{online} (@title:scarf | @sku:{scarf}))"
        );
    }
}
