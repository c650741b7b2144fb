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

//! Table type for Sievedb - named, ordered rows plus a canonical column order

use std::fmt::Write as _;

use super::row::Row;

/// A named table: an ordered list of rows and the canonical column order
/// used for display and projection
///
/// Every column in `columns` exists in every row unless the table is a
/// projection result, in which case rows may be sparse.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Canonical display/projection column order
    pub columns: Vec<String>,
    /// Rows in insertion order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table with rows
    pub fn with_rows(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a column-aligned text report
    ///
    /// Columns are separated by ` | `, the header is underlined with a
    /// `-`/`+` rule, and a `(<n> rows)` trailer follows. Cells for
    /// columns a sparse row does not carry render empty.
    pub fn render_text(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        for row in &self.rows {
            for (i, column) in self.columns.iter().enumerate() {
                if let Some(value) = row.get(column) {
                    widths[i] = widths[i].max(value.to_string().len());
                }
            }
        }

        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = w))
            .collect();
        out.push_str(&header.join(" | "));
        out.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(c, w)| {
                    let text = row.get(c).map(|v| v.to_string()).unwrap_or_default();
                    format!("{:<width$}", text, width = w)
                })
                .collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }

        let _ = write!(out, "\n({} rows)\n", self.rows.len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;

    fn sample_table() -> Table {
        Table::with_rows(
            "users",
            vec!["id".to_string(), "name".to_string()],
            vec![
                Row::from_pairs([("id", Value::integer(1)), ("name", Value::text("Alice"))]),
                Row::from_pairs([("id", Value::integer(2)), ("name", Value::text("Bob"))]),
            ],
        )
    }

    #[test]
    fn test_render_alignment() {
        let rendered = sample_table().render_text();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "id | name ");
        assert_eq!(lines[1], "---+------");
        assert_eq!(lines[2], "1  | Alice");
        assert_eq!(lines[3], "2  | Bob  ");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "(2 rows)");
    }

    #[test]
    fn test_render_widens_to_longest_value() {
        let table = Table::with_rows(
            "t",
            vec!["x".to_string()],
            vec![Row::from_pairs([("x", Value::text("longvalue"))])],
        );
        let rendered = table.render_text();
        assert!(rendered.starts_with("x        \n"));
    }

    #[test]
    fn test_render_sparse_row_blank_cell() {
        let table = Table::with_rows(
            "t",
            vec!["a".to_string(), "b".to_string()],
            vec![Row::from_pairs([("a", Value::integer(1))])],
        );
        let lines: Vec<String> = table
            .render_text()
            .lines()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(lines[2], "1 |  ");
    }

    #[test]
    fn test_row_count_trailer() {
        let rendered = sample_table().render_text();
        assert!(rendered.ends_with("(2 rows)\n"));
    }
}
