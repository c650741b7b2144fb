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

//! Backing table catalog
//!
//! The catalog models the authoritative store behind the semantic cache:
//! an in-memory mapping from table name to an immutable table. It is
//! built once at startup and is read-only afterwards, so concurrent
//! lookups need no synchronization. Tables are handed out as `Arc`s and
//! outlive any cached snapshot derived from them.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{Error, Result, Row, Table, Value};

/// Read-only catalog of named tables
#[derive(Debug, Default)]
pub struct Catalog {
    tables: FxHashMap<String, Arc<Table>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the catalog, replacing any previous table of the
    /// same name
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), Arc::new(table));
    }

    /// Look up a table by name
    pub fn get(&self, name: &str) -> Result<Arc<Table>> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Names of all tables in the catalog
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Build a catalog seeded with the sample dataset
    pub fn with_sample_data() -> Self {
        let mut catalog = Self::new();

        let users_columns = ["id", "name", "age"];
        let users_rows = [
            (1, "Alice", 31),
            (2, "Bob", 45),
            (3, "Charlie", 55),
            (4, "David", 25),
            (5, "Eve", 60),
            (6, "Frank", 42),
            (7, "Grace", 97),
            (8, "Heidi", 83),
            (9, "Ivan", 76),
            (10, "Judy", 64),
            (11, "Karl", 19),
            (12, "Laura", 8),
        ];
        catalog.add_table(Table::with_rows(
            "users",
            users_columns.iter().map(|c| c.to_string()).collect(),
            users_rows
                .iter()
                .map(|(id, name, age)| {
                    Row::from_pairs([
                        ("id", Value::integer(*id)),
                        ("name", Value::text(*name)),
                        ("age", Value::integer(*age)),
                    ])
                })
                .collect(),
        ));

        let logs_columns = ["server_name", "cpu_load", "status"];
        let logs_rows = [
            ("web-01", 45, "ok"),
            ("web-02", 81, "warn"),
            ("api-01", 88, "ok"),
            ("api-02", 96, "critical"),
            ("db-01", 85, "warn"),
            ("db-02", 99, "critical"),
            ("cache-01", 62, "ok"),
        ];
        catalog.add_table(Table::with_rows(
            "server_logs",
            logs_columns.iter().map(|c| c.to_string()).collect(),
            logs_rows
                .iter()
                .map(|(server, load, status)| {
                    Row::from_pairs([
                        ("server_name", Value::text(*server)),
                        ("cpu_load", Value::integer(*load)),
                        ("status", Value::text(*status)),
                    ])
                })
                .collect(),
        ));

        let products_columns = ["id", "item", "stock"];
        let products_rows = [(101, "apple", 500), (102, "banana", 200), (103, "orange", 350)];
        catalog.add_table(Table::with_rows(
            "products",
            products_columns.iter().map(|c| c.to_string()).collect(),
            products_rows
                .iter()
                .map(|(id, item, stock)| {
                    Row::from_pairs([
                        ("id", Value::integer(*id)),
                        ("item", Value::text(*item)),
                        ("stock", Value::integer(*stock)),
                    ])
                })
                .collect(),
        ));

        catalog
    }
}
