// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search execution backends.
//!
//! - [`redis::RedisSearchBackend`]: FT.SEARCH against Redis Stack
//! - [`memory::InMemoryBackend`]: evaluates queries in-process, for tests and demos

pub mod memory;
pub mod redis;
pub mod traits;
