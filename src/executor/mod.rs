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

//! Query executor
//!
//! - [`Engine`] - the request pipeline (parse → direct → semantic → fill)
//! - [`SemanticCache`] - bounded LRU with direct and semantic lookup
//! - [`filter`] - WHERE/projection evaluation
//! - [`subsume`] - query subsumption analysis
//! - [`EngineConfig`] - capacity and miss-penalty settings

pub mod config;
pub mod engine;
pub mod filter;
pub mod semantic_cache;
pub mod subsume;

pub use config::{EngineConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_MISS_PENALTY};
pub use engine::{CacheOutcome, Engine, QueryOutcome};
pub use filter::{evaluate, row_matches};
pub use semantic_cache::{CacheStats, SemanticCache};
pub use subsume::subsumes;
