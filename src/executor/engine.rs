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

//! Request pipeline
//!
//! Orchestrates a query request: parse, probe the cache directly, probe
//! it semantically, and only then pay the backing-store miss. The miss
//! path sleeps for the configured penalty (with no cache lock held),
//! evaluates against the catalog, and fills the cache.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::{Error, Result, Table};
use crate::parser::parse_query;
use crate::storage::Catalog;

use super::config::EngineConfig;
use super::filter::evaluate;
use super::semantic_cache::{CacheStats, SemanticCache};

/// How a query was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Exact match on canonical text
    DirectHit,
    /// Served by re-filtering a subsuming cached entry
    SemanticHit,
    /// Executed against the backing catalog
    Miss,
}

impl std::fmt::Display for CacheOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheOutcome::DirectHit => write!(f, "direct hit"),
            CacheOutcome::SemanticHit => write!(f, "semantic hit"),
            CacheOutcome::Miss => write!(f, "miss"),
        }
    }
}

/// The answer to a query request
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Result table (shared with the cache on the miss path)
    pub results: Arc<Table>,
    /// How the query was answered
    pub outcome: CacheOutcome,
    /// Wall-clock time spent in the pipeline
    pub elapsed: Duration,
}

/// Query engine: parser, semantic cache, and backing catalog glued into
/// one request pipeline
///
/// The engine is shared across connection threads; the cache carries the
/// only guarded mutable state.
#[derive(Debug)]
pub struct Engine {
    catalog: Arc<Catalog>,
    cache: SemanticCache,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine over a catalog
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        let cache = SemanticCache::new(config.cache_capacity);
        Self {
            catalog,
            cache,
            config,
        }
    }

    /// Create an engine with default configuration
    pub fn with_defaults(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, EngineConfig::default())
    }

    /// Execute a raw query string
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] when the text matches neither grammatical shape;
    /// [`Error::TableNotFound`] when a miss reaches the catalog with an
    /// unknown table. A miss that errors is still counted as a miss.
    pub fn execute(&self, raw: &str) -> Result<QueryOutcome> {
        let start = Instant::now();
        self.cache.record_query();

        let query = parse_query(raw).map_err(|e| Error::parse(e.to_string()))?;

        if let Some(results) = self.cache.get_direct(&query.original_text) {
            let elapsed = start.elapsed();
            debug!(query = %query.original_text, ?elapsed, "direct cache hit");
            return Ok(QueryOutcome {
                results,
                outcome: CacheOutcome::DirectHit,
                elapsed,
            });
        }

        if let Some(results) = self.cache.find_semantic(&query) {
            let elapsed = start.elapsed();
            debug!(query = %query.original_text, ?elapsed, "semantic cache hit");
            return Ok(QueryOutcome {
                results,
                outcome: CacheOutcome::SemanticHit,
                elapsed,
            });
        }

        // Simulated I/O cost of the backing store; no cache lock is held
        if !self.config.miss_penalty.is_zero() {
            thread::sleep(self.config.miss_penalty);
        }
        self.cache.record_miss();

        let table = self.catalog.get(&query.table)?;
        let results = Arc::new(evaluate(&query, &table.columns, &table.rows));
        self.cache.insert(query.clone(), results.clone());

        let elapsed = start.elapsed();
        debug!(
            query = %query.original_text,
            ?elapsed,
            penalty = ?self.config.miss_penalty,
            "cache miss filled from backing store"
        );

        Ok(QueryOutcome {
            results,
            outcome: CacheOutcome::Miss,
            elapsed,
        })
    }

    /// Snapshot of the cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The textual statistics report served for SQLSTATS; bypasses the
    /// parser entirely
    pub fn stats_report(&self) -> String {
        self.cache.stats().to_string()
    }

    /// The backing catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
