// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for catalog search.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for choosing the exporter.
//!
//! # Metric Naming Convention
//! - `catalog_search_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `profile`: product, article, session, tag, filter, seo
//! - `status`: success, or the failure kind (connection, timeout, protocol, engine)

use metrics::{counter, histogram};
use std::time::{Duration, Instant};

/// Record a search call and its outcome
pub fn record_query(profile: &str, status: &str) {
    counter!(
        "catalog_search_queries_total",
        "profile" => profile.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record search latency
pub fn record_latency(profile: &str, duration: Duration) {
    histogram!(
        "catalog_search_query_seconds",
        "profile" => profile.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record how many items a search returned
pub fn record_results(profile: &str, count: usize) {
    histogram!(
        "catalog_search_results",
        "profile" => profile.to_string()
    )
    .record(count as f64);
}

/// Record a raw record that could not be mapped
pub fn record_malformed(kind: &str) {
    counter!(
        "catalog_search_malformed_records_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record a snapshot replacement
pub fn record_snapshot_reload(snapshot: &str, success: bool) {
    let status = if success { "success" } else { "error" };
    counter!(
        "catalog_search_snapshot_reloads_total",
        "snapshot" => snapshot.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record index operations (create)
pub fn record_index_operation(operation: &str, success: bool) {
    let status = if success { "success" } else { "error" };
    counter!(
        "catalog_search_index_operations_total",
        "operation" => operation.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record a backend connection failure
pub fn record_connection_error(backend: &str) {
    counter!(
        "catalog_search_connection_errors_total",
        "backend" => backend.to_string()
    )
    .increment(1);
}

/// A timing guard that records search latency on drop
pub struct LatencyTimer {
    profile: &'static str,
    start: Instant,
}

impl LatencyTimer {
    /// Start a new latency timer
    pub fn new(profile: &'static str) -> Self {
        Self {
            profile,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_latency(self.profile, self.start.elapsed());
    }
}
