// Copyright 2025 Sievedb Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Sievedb - mini data server with a semantic query cache
//!
//! Sievedb is a small Redis-protocol data server whose query surface is
//! backed by a **semantic result cache**: when an incoming query is
//! logically subsumed by a previously cached query, it is answered by
//! re-filtering the cached superset locally instead of paying the trip
//! to the backing store.
//!
//! ## Key pieces
//!
//! - **Query parser** - a restricted `SELECT cols FROM table [WHERE col
//!   op value]` surface, hand-lexed and parsed into a small AST
//! - **Subsumption engine** - decides when one query's result set is
//!   provably contained in another's (range tightening on integer
//!   columns, projection containment)
//! - **Semantic LRU cache** - bounded, recency-ordered, with direct
//!   (exact text) and semantic (subsumption scan) lookup paths
//! - **Request pipeline** - parse → direct probe → semantic probe →
//!   miss fill, with hit/miss accounting and an artificial miss penalty
//!   that keeps the cache's effect observable
//! - **RESP server** - thread-per-connection TCP loop speaking
//!   length-prefixed arrays of bulk strings
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use sievedb::executor::{CacheOutcome, Engine, EngineConfig};
//! use sievedb::storage::Catalog;
//!
//! let catalog = Arc::new(Catalog::with_sample_data());
//! let engine = Engine::new(
//!     catalog,
//!     EngineConfig::default().with_miss_penalty(std::time::Duration::ZERO),
//! );
//!
//! // First time: a miss, filled from the catalog
//! let first = engine.execute("SELECT * FROM users WHERE age > 40").unwrap();
//! assert_eq!(first.outcome, CacheOutcome::Miss);
//!
//! // A stricter query is served from the cached superset
//! let second = engine.execute("SELECT name FROM users WHERE age > 50").unwrap();
//! assert_eq!(second.outcome, CacheOutcome::SemanticHit);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - fundamental types ([`Value`], [`Row`], [`Table`], [`Error`])
//! - [`parser`] - query lexer, parser, and AST
//! - [`storage`] - backing table catalog and companion KV store
//! - [`executor`] - evaluator, subsumption, semantic cache, pipeline
//! - [`server`] - RESP codec, command dispatch, TCP accept loop

pub mod core;
pub mod executor;
pub mod parser;
pub mod server;
pub mod storage;

// Re-export main types for convenience
pub use crate::core::{Error, Result, Row, Table, Value};
pub use crate::executor::{
    CacheOutcome, CacheStats, Engine, EngineConfig, QueryOutcome, SemanticCache,
};
pub use crate::parser::{parse_query, CompareOp, Projection, Query, WhereClause};
pub use crate::server::Server;
pub use crate::storage::{Catalog, KvStore};
