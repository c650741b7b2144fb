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

//! Companion string key/value store
//!
//! Backs the plain Redis-style commands (SET/GET/DEL) that sit alongside
//! the query surface. Independent of the semantic cache; guarded by its
//! own lock.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// In-memory string key/value store
#[derive(Debug, Default)]
pub struct KvStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl KvStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, overwriting any previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Get a key's value
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Delete keys, returning how many existed
    pub fn delete<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> usize {
        let mut entries = self.entries.write();
        keys.into_iter()
            .filter(|key| entries.remove(*key).is_some())
            .count()
    }

    /// Number of keys in the store
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
