// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Property-based tests for the search core.
//!
//! Uses proptest to generate random user input and verify the escaper,
//! compiler, mapper and paginator keep their guarantees and never panic.
//!
//! Run with: `cargo test --test proptest_fuzz`

use std::collections::HashMap;

use proptest::prelude::*;

use catalog_search::search::{escape, is_reserved, unescape, ESCAPE_MARKER};
use catalog_search::{
    map_records, CatalogConfig, Paginator, ParseMode, Product, Query, QueryCompiler, QueryParams, RawRecord,
    Searchable,
};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Text mixing letters, spaces, backslashes and every reserved character
fn query_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ]",
            Just("\\".to_string()),
            "[,.<>{}\\[\\]\":;!@#$%^&*()\\-+=~]",
            any::<char>().prop_map(|c| c.to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

/// A record with a random subset of product fields, some of them garbage
fn product_record_strategy() -> impl Strategy<Value = RawRecord> {
    let field = prop_oneof![
        Just("id"),
        Just("title"),
        Just("price"),
        Just("quantity"),
        Just("status"),
        Just("updated_at"),
        Just("tags"),
        Just("meta"),
        Just("discount"),
    ];
    let value = prop_oneof!["[0-9]{1,10}", "-?[0-9]{1,4}\\.[0-9]{1,2}", ".{0,20}"];

    prop::collection::hash_map(field, value, 0..9).prop_map(|fields| {
        RawRecord::new(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<HashMap<_, _>>(),
        )
    })
}

// =============================================================================
// Escaping
// =============================================================================

proptest! {
    /// Escaping then unescaping gives back the input
    #[test]
    fn prop_escape_round_trip(s in query_text_strategy()) {
        prop_assert_eq!(unescape(&escape(&s)), s);
    }

    /// Every reserved character of the output is preceded by a marker
    #[test]
    fn prop_escape_guards_reserved(s in query_text_strategy()) {
        let escaped: Vec<char> = escape(&s).chars().collect();
        let mut i = 0;
        while i < escaped.len() {
            let c = escaped[i];
            if c == ESCAPE_MARKER && escaped.get(i + 1).copied().is_some_and(is_reserved) {
                i += 2;
                continue;
            }
            prop_assert!(!is_reserved(c), "bare reserved char {:?} in {:?}", c, escaped);
            i += 1;
        }
    }

    /// Unescaping never grows the input
    #[test]
    fn prop_unescape_never_grows(s in query_text_strategy()) {
        prop_assert!(unescape(&s).chars().count() <= s.chars().count());
    }
}

// =============================================================================
// Pagination
// =============================================================================

proptest! {
    /// Consecutive pages tile the result set without gaps or overlap
    #[test]
    fn prop_window_monotonic(page in 1u64..(u64::MAX / 500), ipp in 1u64..500) {
        let current = Paginator::new(page, ipp).window();
        let next = Paginator::new(page + 1, ipp).window();

        prop_assert_eq!(current.count(), ipp);
        prop_assert_eq!(current.limit, next.offset);
        prop_assert!(next.offset > current.offset);
    }

    /// Display bounds stay consistent with what was loaded
    #[test]
    fn prop_pagination_bounds(page in 1u64..50, ipp in 1u64..50, total in 0u64..2_000) {
        let paginator = Paginator::new(page, ipp);
        let first = (page - 1) * ipp;
        let loaded = total.saturating_sub(first).min(ipp);
        let p = paginator.build(total, loaded);

        prop_assert!(p.max_page * ipp >= total);
        prop_assert!(p.max_page == 0 || (p.max_page - 1) * ipp < total);
        if loaded > 0 {
            prop_assert!(p.start >= 1 && p.start <= p.end);
            prop_assert!(p.end <= total);
        } else {
            prop_assert_eq!(p.start, 0);
            prop_assert_eq!(p.end, first);
        }
        prop_assert_eq!(p.is_first, page == 1);
    }

    /// The page window is centered on the current page, at most five wide
    #[test]
    fn prop_page_window_centered(page in 1u64..200, ipp in 1u64..50, total in 0u64..5_000) {
        let p = Paginator::new(page, ipp).build(total, 0);

        prop_assert!(p.page_window.len() <= 5);
        prop_assert!(p.page_window.contains(&page));
        prop_assert!(p.page_window.windows(2).all(|w| w[1] == w[0] + 1));
        prop_assert!(p.page_window.iter().all(|&n| n >= 1));
        prop_assert!(p.page_window.iter().all(|&n| n <= page || n <= p.max_page));
        prop_assert!(p.page_window.iter().all(|&n| n.abs_diff(page) <= 2));
    }

    /// Any page number yields a window that fits, without panicking
    #[test]
    fn prop_any_page_is_addressable(page in any::<u64>(), ipp in 1u64..10_000, total in any::<u64>(), loaded in 0u64..10_000) {
        let paginator = Paginator::new(page, ipp);
        prop_assert!(paginator.page >= 1);
        prop_assert_eq!(paginator.window().count(), ipp);

        let p = paginator.build(total, loaded);
        prop_assert!(p.page_window.len() <= 5);
        prop_assert!(p.end >= p.start);

        let raw = page.to_string();
        let from_raw = Paginator::from_params(Some(raw.as_str()), None, ipp);
        prop_assert_eq!(from_raw.window().count(), ipp);
    }

    /// Garbage page values always fall back to page 1
    #[test]
    fn prop_bad_page_is_first(raw in "[^0-9]{0,8}|-[0-9]{1,5}|0") {
        let paginator = Paginator::from_params(Some(raw.as_str()), None, 12);
        prop_assert_eq!(paginator.page, 1);
        prop_assert_eq!(paginator.offset, 0);
    }
}

// =============================================================================
// Compilation
// =============================================================================

proptest! {
    /// Facet keys the catalog does not know never change the expression
    #[test]
    fn prop_unknown_facets_ignored(
        keywords in query_text_strategy(),
        key in "[a-z]{1,8}",
        values in prop::collection::vec("[a-z0-9]{1,6}", 1..4),
    ) {
        let config = CatalogConfig::default();
        let profile = Product::profile(&config);
        let compiler = QueryCompiler::new().with_facets(["color"]);
        prop_assume!(!compiler.is_known_facet(&key));

        let window = Paginator::new(1, 12).window();
        let plain = Query::keywords(keywords.clone());
        let faceted = Query::keywords(keywords).with_facet(key, values);

        prop_assert_eq!(
            compiler.compile(&plain, &profile, window).expression,
            compiler.compile(&faceted, &profile, window).expression
        );
    }

    /// Compilation is deterministic and keeps user text escaped
    #[test]
    fn prop_compile_deterministic(keywords in query_text_strategy(), tags in prop::collection::vec(query_text_strategy(), 0..3)) {
        let config = CatalogConfig::default();
        let profile = Product::profile(&config);
        let compiler = QueryCompiler::new();
        let window = Paginator::new(1, 12).window();

        let query = tags.iter().fold(Query::keywords(keywords), |q, t| q.with_tag(t.clone()));
        let a = compiler.compile(&query, &profile, window);
        let b = compiler.compile(&query, &profile, window);

        prop_assert_eq!(&a.expression, &b.expression);
        prop_assert!(a.expression.starts_with('('));
        prop_assert_eq!(a.to_args().len(), 10);
    }
}

// =============================================================================
// Mapping and parameters
// =============================================================================

proptest! {
    /// The mapper skips what it cannot read and never invents records
    #[test]
    fn prop_mapping_best_effort(records in prop::collection::vec(product_record_strategy(), 0..20)) {
        let products = map_records::<Product>(&records);
        prop_assert!(products.len() <= records.len());

        let complete = records
            .iter()
            .filter(|r| ["id", "price", "quantity", "updated_at"].iter().all(|f| r.contains(f)))
            .count();
        prop_assert!(products.len() <= complete);
    }

    /// Lenient parsing accepts any parameter values
    #[test]
    fn prop_lenient_params_never_fail(
        min in ".{0,12}",
        max in ".{0,12}",
        page in ".{0,6}",
        facet in "[a-z]{1,6}",
        value in ".{0,12}",
    ) {
        let params = QueryParams::from_pairs([
            ("min", min.as_str()),
            ("max", max.as_str()),
            ("page", page.as_str()),
            (facet.as_str(), value.as_str()),
        ]);

        let query = params.to_query(ParseMode::Lenient).unwrap();
        prop_assert!(query.price_min.map_or(true, |v| v.is_finite() && v >= 0.0));
        prop_assert!(query.price_max.map_or(true, |v| v.is_finite() && v >= 0.0));
        prop_assert!(params.paginator(12).page >= 1);
    }
}
