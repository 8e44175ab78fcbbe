// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! RediSearch backend.
//!
//! Catalog documents are Redis hashes (`product:<id>`, `blog:<id>`, ...)
//! indexed with `FT.CREATE ... ON HASH`. A search is a single FT.SEARCH:
//!
//! ```text
//! FT.SEARCH product-idx "(@status:{online} @type:{product})" SORTBY updated_at DESC LIMIT 0 12 DIALECT 2
//! ```
//!
//! Both reply layouts are understood:
//! - RESP2: `[total, key1, [field, value, ...], key2, [...], ...]`
//! - RESP3: `{total_results: n, results: [{id, extra_attributes: {field: value}}]}`

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{cmd, Client, RedisError, Value};
use tracing::{debug, error, info};

use super::traits::{BackendError, SearchBackend, SearchReply};
use crate::mapper::RawRecord;
use crate::metrics;
use crate::resilience::retry::{retry, RetryConfig};
use crate::search::{CompiledQuery, SearchIndex};

pub struct RedisSearchBackend {
    connection: ConnectionManager,
}

impl RedisSearchBackend {
    /// Connect, retrying with the startup backoff.
    pub async fn connect(connection_string: &str) -> Result<Self, BackendError> {
        Self::connect_with(connection_string, &RetryConfig::startup()).await
    }

    pub async fn connect_with(connection_string: &str, config: &RetryConfig) -> Result<Self, BackendError> {
        let client = Client::open(connection_string)
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        let connection = retry("redis_connect", config, || {
            let client = client.clone();
            async move { ConnectionManager::new(client).await }
        })
        .await
        .map_err(|e: RedisError| {
            metrics::record_connection_error("redis");
            BackendError::Connection(e.to_string())
        })?;

        info!("Connected to RediSearch");
        Ok(Self { connection })
    }
}

#[async_trait]
impl SearchBackend for RedisSearchBackend {
    async fn execute(&self, query: &CompiledQuery) -> Result<SearchReply, BackendError> {
        let mut conn = self.connection.clone();

        let mut command = cmd("FT.SEARCH");
        for arg in query.to_args() {
            command.arg(arg);
        }

        let raw: Value = command.query_async(&mut conn).await.map_err(|e| {
            error!(index = %query.index, error = %e, "FT.SEARCH failed");
            map_redis_error(e)
        })?;

        let reply = parse_search_reply(raw)?;
        debug!(index = %query.index, total = reply.total, records = reply.records.len(), "FT.SEARCH done");
        Ok(reply)
    }

    async fn create_index(&self, index: &SearchIndex) -> Result<(), BackendError> {
        let mut conn = self.connection.clone();

        let mut command = cmd("FT.CREATE");
        for arg in index.to_ft_create_args() {
            command.arg(arg);
        }

        let result: Result<(), RedisError> = command.query_async(&mut conn).await;
        match result {
            Ok(()) => {
                info!(index = %index.name, "Search index created");
                metrics::record_index_operation("create", true);
                Ok(())
            }
            Err(e) if e.to_string().contains("Index already exists") => {
                debug!(index = %index.name, "Search index already exists");
                metrics::record_index_operation("create", true);
                Ok(())
            }
            Err(e) => {
                error!(index = %index.name, error = %e, "FT.CREATE failed");
                metrics::record_index_operation("create", false);
                Err(map_redis_error(e))
            }
        }
    }
}

fn map_redis_error(e: RedisError) -> BackendError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout() {
        metrics::record_connection_error("redis");
        BackendError::Connection(e.to_string())
    } else if e.kind() == redis::ErrorKind::TypeError {
        BackendError::Protocol(e.to_string())
    } else {
        BackendError::Engine(e.to_string())
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::BulkString(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Value::SimpleString(s) => Some(s.clone()),
        Value::Int(v) => Some(v.to_string()),
        Value::Double(v) => Some(v.to_string()),
        Value::Boolean(v) => Some(v.to_string()),
        Value::VerbatimString { text, .. } => Some(text.clone()),
        _ => None,
    }
}

fn value_to_total(value: &Value) -> Result<u64, BackendError> {
    match value {
        Value::Int(v) => u64::try_from(*v)
            .map_err(|_| BackendError::Protocol(format!("negative total {v}"))),
        other => value_to_string(other)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| BackendError::Protocol(format!("unexpected total {other:?}"))),
    }
}

/// Field/value pairs, as a flat RESP2 array or a RESP3 map.
fn value_to_record(value: &Value) -> Result<RawRecord, BackendError> {
    let mut fields = HashMap::new();

    match value {
        Value::Array(items) => {
            for pair in items.chunks(2) {
                if let [field, val] = pair {
                    if let (Some(f), Some(v)) = (value_to_string(field), value_to_string(val)) {
                        fields.insert(f, v);
                    }
                }
            }
        }
        Value::Map(pairs) => {
            for (field, val) in pairs {
                if let (Some(f), Some(v)) = (value_to_string(field), value_to_string(val)) {
                    fields.insert(f, v);
                }
            }
        }
        Value::Nil => {}
        other => {
            return Err(BackendError::Protocol(format!("unexpected document {other:?}")));
        }
    }

    Ok(RawRecord::new(fields))
}

fn map_get<'a>(pairs: &'a [(Value, Value)], key: &str) -> Option<&'a Value> {
    pairs
        .iter()
        .find(|(k, _)| value_to_string(k).as_deref() == Some(key))
        .map(|(_, v)| v)
}

/// Decode an FT.SEARCH reply.
pub fn parse_search_reply(raw: Value) -> Result<SearchReply, BackendError> {
    match raw {
        Value::Array(values) => {
            let Some(first) = values.first() else {
                return Ok(SearchReply::default());
            };
            let total = value_to_total(first)?;

            // Key and document alternate after the total
            let records = values[1..]
                .chunks(2)
                .filter_map(|chunk| chunk.get(1))
                .map(value_to_record)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(SearchReply { total, records })
        }
        Value::Map(pairs) => {
            let total = map_get(&pairs, "total_results")
                .map(value_to_total)
                .transpose()?
                .unwrap_or(0);

            let records = match map_get(&pairs, "results") {
                Some(Value::Array(results)) => results
                    .iter()
                    .map(|result| match result {
                        Value::Map(doc) => map_get(doc, "extra_attributes")
                            .map(value_to_record)
                            .unwrap_or_else(|| Ok(RawRecord::default())),
                        other => Err(BackendError::Protocol(format!("unexpected result {other:?}"))),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Some(other) => {
                    return Err(BackendError::Protocol(format!("unexpected results {other:?}")));
                }
                None => Vec::new(),
            };

            Ok(SearchReply { total, records })
        }
        other => Err(BackendError::Protocol(format!("unexpected reply {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(s: &str) -> Value {
        Value::BulkString(s.as_bytes().to_vec())
    }

    #[test]
    fn test_parse_resp2_reply() {
        let raw = Value::Array(vec![
            Value::Int(30),
            bulk("product:1"),
            Value::Array(vec![bulk("id"), bulk("1"), bulk("title"), bulk("Scarf")]),
            bulk("product:2"),
            Value::Array(vec![bulk("id"), bulk("2")]),
        ]);

        let reply = parse_search_reply(raw).unwrap();
        assert_eq!(reply.total, 30);
        assert_eq!(reply.records.len(), 2);
        assert_eq!(reply.records[0].get("title"), Some("Scarf"));
        assert_eq!(reply.records[1].get("id"), Some("2"));
    }

    #[test]
    fn test_parse_resp2_count_only() {
        let reply = parse_search_reply(Value::Array(vec![Value::Int(4)])).unwrap();
        assert_eq!(reply.total, 4);
        assert!(reply.records.is_empty());
    }

    #[test]
    fn test_parse_resp3_reply() {
        let raw = Value::Map(vec![
            (bulk("total_results"), Value::Int(1)),
            (
                bulk("results"),
                Value::Array(vec![Value::Map(vec![
                    (bulk("id"), bulk("blog:7")),
                    (
                        bulk("extra_attributes"),
                        Value::Map(vec![(bulk("id"), bulk("7")), (bulk("type"), bulk("blog"))]),
                    ),
                ])]),
            ),
        ]);

        let reply = parse_search_reply(raw).unwrap();
        assert_eq!(reply.total, 1);
        assert_eq!(reply.records[0].get("type"), Some("blog"));
    }

    #[test]
    fn test_parse_unexpected_reply() {
        let err = parse_search_reply(Value::Okay).unwrap_err();
        assert!(matches!(err, BackendError::Protocol(_)));

        let err = parse_search_reply(Value::Array(vec![bulk("many")])).unwrap_err();
        assert!(matches!(err, BackendError::Protocol(_)));
    }

    #[test]
    fn test_parse_empty_reply() {
        let reply = parse_search_reply(Value::Array(vec![])).unwrap();
        assert_eq!(reply, SearchReply::default());
    }

    #[tokio::test]
    #[ignore] // Requires Redis Stack at REDIS_URL
    async fn test_live_search() {
        use crate::config::CatalogConfig;
        use crate::domain::{Product, Searchable};
        use crate::pagination::Window;
        use crate::query::Query;
        use crate::search::QueryCompiler;

        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        let backend = RedisSearchBackend::connect(&url).await.unwrap();
        let config = CatalogConfig::default();

        backend.create_index(&Product::index(&config)).await.unwrap();
        // Second create is a no-op
        backend.create_index(&Product::index(&config)).await.unwrap();

        let compiled = QueryCompiler::new().compile(&Query::default(), &Product::profile(&config), Window::new(0, 12));
        let reply = backend.execute(&compiled).await.unwrap();
        assert!(reply.records.len() as u64 <= reply.total.max(12));
    }
}
