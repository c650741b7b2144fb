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

//! Semantic result cache with predicate subsumption
//!
//! A bounded LRU of (query, result table) pairs with two lookup paths:
//!
//! 1. **Direct** - exact match on the query's canonical text.
//! 2. **Semantic** - scan from most- to least-recently used for a cached
//!    query that subsumes the new one; serve the hit by re-filtering and
//!    re-projecting the cached rows locally.
//!
//! Both paths promote the hit entry. Eviction removes the
//! least-recently-used entry when an insert would exceed capacity.
//!
//! Internally the list+index pair of a classic LRU collapses into one
//! lock-guarded map whose slots carry strictly monotonic recency ticks:
//! MRU→LRU order is descending tick order and the back of the list is
//! the minimum tick. Cached result tables are immutable after insertion
//! and shared out as `Arc`s.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::core::Table;
use crate::parser::Query;

use super::filter::evaluate;
use super::subsume::subsumes;

/// A cached query with its materialized results
#[derive(Debug, Clone)]
struct CacheSlot {
    /// The parsed query this entry answers
    query: Query,
    /// Materialized output of `query` at insertion time
    results: Arc<Table>,
    /// Recency tick; higher is more recent
    last_used: u64,
}

/// Guarded cache state: the slot map and the tick counter
#[derive(Debug, Default)]
struct CacheInner {
    slots: FxHashMap<String, CacheSlot>,
    tick: u64,
}

impl CacheInner {
    /// Next recency tick (strictly monotonic under the write lock)
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Key of the least-recently-used slot
    fn lru_key(&self) -> Option<String> {
        self.slots
            .values()
            .min_by_key(|slot| slot.last_used)
            .map(|slot| slot.query.original_text.clone())
    }
}

/// Hit/miss counters (lock-free)
#[derive(Debug, Default)]
struct CacheCounters {
    total_queries: AtomicU64,
    direct_hits: AtomicU64,
    semantic_hits: AtomicU64,
    misses: AtomicU64,
}

/// Snapshot of cache statistics (plain values for reading)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Queries that entered the pipeline
    pub total_queries: u64,
    /// Hits by exact canonical text
    pub direct_hits: u64,
    /// Hits served by re-filtering a subsuming entry
    pub semantic_hits: u64,
    /// Queries that went to the backing store
    pub misses: u64,
    /// Current number of cached entries
    pub size: usize,
    /// Maximum number of cached entries
    pub capacity: usize,
}

impl CacheStats {
    fn percent(&self, count: u64) -> f64 {
        if self.total_queries == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total_queries as f64
        }
    }
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "semantic cache statistics:")?;
        writeln!(f, "  total queries : {}", self.total_queries)?;
        writeln!(
            f,
            "  direct hits   : {} ({:.1}%)",
            self.direct_hits,
            self.percent(self.direct_hits)
        )?;
        writeln!(
            f,
            "  semantic hits : {} ({:.1}%)",
            self.semantic_hits,
            self.percent(self.semantic_hits)
        )?;
        writeln!(
            f,
            "  misses        : {} ({:.1}%)",
            self.misses,
            self.percent(self.misses)
        )?;
        write!(f, "  entries       : {}/{}", self.size, self.capacity)
    }
}

/// Bounded LRU cache of query results with a semantic lookup path
#[derive(Debug)]
pub struct SemanticCache {
    inner: RwLock<CacheInner>,
    capacity: usize,
    counters: CacheCounters,
}

impl SemanticCache {
    /// Create a cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
            capacity,
            counters: CacheCounters::default(),
        }
    }

    /// Look up an entry by the query's canonical text
    ///
    /// A hit promotes the entry to the front and counts as a direct hit.
    /// Promotion mutates recency, so this takes the write lock.
    pub fn get_direct(&self, key: &str) -> Option<Arc<Table>> {
        let mut inner = self.inner.write();
        let tick = inner.next_tick();

        let slot = inner.slots.get_mut(key)?;
        slot.last_used = tick;
        let results = slot.results.clone();
        drop(inner);

        self.counters.direct_hits.fetch_add(1, Ordering::Relaxed);
        Some(results)
    }

    /// Scan for a cached query that subsumes `query`, MRU to LRU
    ///
    /// The first subsuming entry wins. The hit's rows are re-filtered and
    /// re-projected through the evaluator, so the returned table is
    /// freshly computed for `query`. The hit entry is promoted.
    pub fn find_semantic(&self, query: &Query) -> Option<Arc<Table>> {
        let mut inner = self.inner.write();

        let mut order: Vec<(u64, String)> = inner
            .slots
            .values()
            .map(|slot| (slot.last_used, slot.query.original_text.clone()))
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0));

        let mut hit: Option<(String, Table)> = None;
        for (_, key) in order {
            let slot = &inner.slots[&key];
            if subsumes(&slot.query, query) {
                let fresh = evaluate(query, &slot.results.columns, &slot.results.rows);
                hit = Some((key, fresh));
                break;
            }
        }

        let (key, fresh) = hit?;
        let tick = inner.next_tick();
        if let Some(slot) = inner.slots.get_mut(&key) {
            slot.last_used = tick;
        }
        drop(inner);

        self.counters.semantic_hits.fetch_add(1, Ordering::Relaxed);
        Some(Arc::new(fresh))
    }

    /// Insert a query's results
    ///
    /// Re-inserting an existing canonical text replaces its results and
    /// promotes the entry. Otherwise the least-recently-used entry is
    /// evicted when the cache is full, and the new entry lands at the
    /// front.
    pub fn insert(&self, query: Query, results: Arc<Table>) {
        if self.capacity == 0 {
            return;
        }

        let mut inner = self.inner.write();
        let tick = inner.next_tick();

        if let Some(slot) = inner.slots.get_mut(&query.original_text) {
            slot.query = query;
            slot.results = results;
            slot.last_used = tick;
            return;
        }

        if inner.slots.len() >= self.capacity {
            if let Some(lru) = inner.lru_key() {
                inner.slots.remove(&lru);
            }
        }

        let key = query.original_text.clone();
        inner.slots.insert(
            key,
            CacheSlot {
                query,
                results,
                last_used: tick,
            },
        );
    }

    /// Count a query entering the pipeline
    pub fn record_query(&self) {
        self.counters.total_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a backing-store miss
    pub fn record_miss(&self) {
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Current number of cached entries
    pub fn len(&self) -> usize {
        self.inner.read().slots.len()
    }

    /// Check whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check whether an entry with this canonical text is cached,
    /// without touching recency
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().slots.contains_key(key)
    }

    /// Cached canonical texts in MRU→LRU order
    pub fn keys_by_recency(&self) -> Vec<String> {
        let inner = self.inner.read();
        let mut order: Vec<(u64, String)> = inner
            .slots
            .values()
            .map(|slot| (slot.last_used, slot.query.original_text.clone()))
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0));
        order.into_iter().map(|(_, key)| key).collect()
    }

    /// Snapshot of the statistics counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_queries: self.counters.total_queries.load(Ordering::Relaxed),
            direct_hits: self.counters.direct_hits.load(Ordering::Relaxed),
            semantic_hits: self.counters.semantic_hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            size: self.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Row, Value};
    use crate::parser::parse_query;

    fn user(name: &str, age: i64) -> Row {
        Row::from_pairs([("name", Value::text(name)), ("age", Value::integer(age))])
    }

    fn users_table(rows: Vec<Row>) -> Arc<Table> {
        Arc::new(Table::with_rows(
            "results",
            vec!["name".to_string(), "age".to_string()],
            rows,
        ))
    }

    fn insert_query(cache: &SemanticCache, text: &str) {
        let query = parse_query(text).unwrap();
        cache.insert(query, users_table(vec![user("Alice", 31)]));
    }

    #[test]
    fn test_direct_hit_and_miss() {
        let cache = SemanticCache::new(5);
        insert_query(&cache, "SELECT * FROM users");

        assert!(cache.get_direct("SELECT * FROM users").is_some());
        assert!(cache.get_direct("SELECT * FROM products").is_none());

        let stats = cache.stats();
        assert_eq!(stats.direct_hits, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn test_semantic_hit_refilters_cached_rows() {
        let cache = SemanticCache::new(5);
        let cached = parse_query("SELECT * FROM users WHERE age > 40").unwrap();
        cache.insert(
            cached,
            users_table(vec![user("Bob", 45), user("Charlie", 55), user("Eve", 60)]),
        );

        let new = parse_query("SELECT name FROM users WHERE age > 50").unwrap();
        let result = cache.find_semantic(&new).unwrap();

        assert_eq!(result.columns, vec!["name"]);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows[0].get("name"), Some(&Value::text("Charlie")));
        assert_eq!(result.rows[1].get("name"), Some(&Value::text("Eve")));
        assert_eq!(cache.stats().semantic_hits, 1);
    }

    #[test]
    fn test_semantic_miss_counts_nothing() {
        let cache = SemanticCache::new(5);
        insert_query(&cache, "SELECT * FROM users WHERE age > 40");

        let broader = parse_query("SELECT * FROM users WHERE age > 30").unwrap();
        assert!(cache.find_semantic(&broader).is_none());

        let stats = cache.stats();
        assert_eq!(stats.semantic_hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_eviction_from_the_back() {
        let cache = SemanticCache::new(5);
        for i in 1..=6 {
            insert_query(&cache, &format!("SELECT * FROM users WHERE id = {}", i));
        }

        assert_eq!(cache.len(), 5);
        assert!(!cache.contains("SELECT * FROM users WHERE id = 1"));
        assert!(cache.contains("SELECT * FROM users WHERE id = 6"));
    }

    #[test]
    fn test_direct_hit_promotes() {
        let cache = SemanticCache::new(2);
        insert_query(&cache, "SELECT * FROM users WHERE id = 1");
        insert_query(&cache, "SELECT * FROM users WHERE id = 2");

        // Touch the older entry, making id=2 the LRU
        assert!(cache.get_direct("SELECT * FROM users WHERE id = 1").is_some());
        insert_query(&cache, "SELECT * FROM users WHERE id = 3");

        assert!(cache.contains("SELECT * FROM users WHERE id = 1"));
        assert!(!cache.contains("SELECT * FROM users WHERE id = 2"));
    }

    #[test]
    fn test_semantic_hit_promotes() {
        let cache = SemanticCache::new(2);
        let superset = parse_query("SELECT * FROM users WHERE age > 40").unwrap();
        cache.insert(superset, users_table(vec![user("Bob", 45)]));
        insert_query(&cache, "SELECT * FROM products");

        // Semantic hit on the older entry promotes it over products
        let new = parse_query("SELECT name FROM users WHERE age > 50").unwrap();
        assert!(cache.find_semantic(&new).is_some());

        insert_query(&cache, "SELECT * FROM users WHERE id = 9");
        assert!(cache.contains("SELECT * FROM users WHERE age > 40"));
        assert!(!cache.contains("SELECT * FROM products"));
    }

    #[test]
    fn test_scan_order_is_mru_first() {
        let cache = SemanticCache::new(5);
        let first = parse_query("SELECT * FROM users WHERE age > 10").unwrap();
        cache.insert(first, users_table(vec![user("Old", 20)]));
        let second = parse_query("SELECT * FROM users WHERE age > 20").unwrap();
        cache.insert(second, users_table(vec![user("New", 30)]));

        // Both entries subsume the probe; the more recent one must win
        let probe = parse_query("SELECT * FROM users WHERE age > 25").unwrap();
        let result = cache.find_semantic(&probe).unwrap();
        assert_eq!(result.rows[0].get("name"), Some(&Value::text("New")));
    }

    #[test]
    fn test_reinsert_replaces_and_promotes() {
        let cache = SemanticCache::new(2);
        insert_query(&cache, "SELECT * FROM users WHERE id = 1");
        insert_query(&cache, "SELECT * FROM users WHERE id = 2");

        let replacement = parse_query("SELECT * FROM users WHERE id = 1").unwrap();
        cache.insert(replacement, users_table(vec![user("Fresh", 99)]));
        assert_eq!(cache.len(), 2);

        let got = cache.get_direct("SELECT * FROM users WHERE id = 1").unwrap();
        assert_eq!(got.rows[0].get("name"), Some(&Value::text("Fresh")));

        assert_eq!(
            cache.keys_by_recency().first().map(String::as_str),
            Some("SELECT * FROM users WHERE id = 1")
        );
    }

    #[test]
    fn test_counter_identity() {
        let cache = SemanticCache::new(5);
        cache.record_query();
        cache.record_miss();
        insert_query(&cache, "SELECT * FROM users");

        cache.record_query();
        assert!(cache.get_direct("SELECT * FROM users").is_some());

        let stats = cache.stats();
        assert_eq!(
            stats.total_queries,
            stats.direct_hits + stats.semantic_hits + stats.misses
        );
    }

    #[test]
    fn test_stats_display_zero_total() {
        let stats = SemanticCache::new(5).stats();
        let text = stats.to_string();
        assert!(text.contains("total queries : 0"));
        assert!(text.contains("(0.0%)"));
        assert!(text.contains("entries       : 0/5"));
    }

    #[test]
    fn test_stats_display_percentages() {
        let cache = SemanticCache::new(5);
        for _ in 0..4 {
            cache.record_query();
        }
        cache.record_miss();
        insert_query(&cache, "SELECT * FROM users");
        assert!(cache.get_direct("SELECT * FROM users").is_some());
        let new = parse_query("SELECT name FROM users").unwrap();
        assert!(cache.find_semantic(&new).is_some());
        assert!(cache.find_semantic(&new).is_some());

        let text = cache.stats().to_string();
        assert!(text.contains("direct hits   : 1 (25.0%)"));
        assert!(text.contains("semantic hits : 2 (50.0%)"));
        assert!(text.contains("misses        : 1 (25.0%)"));
        assert!(text.contains("entries       : 1/5"));
    }
}
