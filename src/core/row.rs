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

//! Row type for Sievedb - a sparse mapping from column name to value
//!
//! Rows are deliberately map-shaped rather than positional: projection
//! produces rows that carry only a subset of their table's columns.

use rustc_hash::FxHashMap;

use super::value::Value;

/// A table row: column name -> value
///
/// A row need not carry every column of its parent table; projection
/// results are sparse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: FxHashMap<String, Value>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
        }
    }

    /// Create a row from (column, value) pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        }
    }

    /// Set a column value
    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    /// Get a column value
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Check whether the row carries a column
    pub fn contains_column(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Number of columns carried by this row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a new row containing only the requested columns
    ///
    /// Columns absent from this row are silently dropped, so projecting
    /// an unknown column contributes no value to the output row.
    pub fn project(&self, columns: &[String]) -> Row {
        let mut projected = Row::new();
        for column in columns {
            if let Some(value) = self.values.get(column) {
                projected.insert(column.clone(), value.clone());
            }
        }
        projected
    }

    /// Iterate over (column, value) pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::from_pairs([
            ("id", Value::integer(1)),
            ("name", Value::text("Alice")),
            ("age", Value::integer(31)),
        ])
    }

    #[test]
    fn test_row_access() {
        let row = sample_row();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("name"), Some(&Value::text("Alice")));
        assert_eq!(row.get("missing"), None);
        assert!(row.contains_column("age"));
        assert!(!row.contains_column("email"));
    }

    #[test]
    fn test_projection_keeps_requested_columns() {
        let row = sample_row();
        let projected = row.project(&["name".to_string(), "age".to_string()]);
        assert_eq!(projected.len(), 2);
        assert_eq!(projected.get("name"), Some(&Value::text("Alice")));
        assert_eq!(projected.get("id"), None);
    }

    #[test]
    fn test_projection_drops_unknown_columns() {
        let row = sample_row();
        let projected = row.project(&["name".to_string(), "email".to_string()]);
        assert_eq!(projected.len(), 1);
        assert!(projected.contains_column("name"));
        assert!(!projected.contains_column("email"));
    }
}
