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

//! Engine configuration

use std::time::Duration;

/// Default number of entries the semantic cache holds
pub const DEFAULT_CACHE_CAPACITY: usize = 5;

/// Default artificial delay charged to a cache miss, standing in for the
/// cost of reaching the backing store. Keeps the hit/miss distinction
/// observable in tests.
pub const DEFAULT_MISS_PENALTY: Duration = Duration::from_millis(100);

/// Configuration options for the query engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of cached query results
    /// Default: 5
    pub cache_capacity: usize,

    /// Simulated I/O delay applied on every cache miss
    /// Default: 100 ms
    pub miss_penalty: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            miss_penalty: DEFAULT_MISS_PENALTY,
        }
    }
}

impl EngineConfig {
    /// Creates a new EngineConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the cache capacity
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Builder method to set the miss penalty
    pub fn with_miss_penalty(mut self, penalty: Duration) -> Self {
        self.miss_penalty = penalty;
        self
    }
}
