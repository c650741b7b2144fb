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

//! Filter and projection evaluator
//!
//! Applies a query's WHERE predicate and column projection to a set of
//! rows. Used on the miss path against catalog tables and on the
//! semantic-hit path against cached result rows.

use crate::core::{Row, Table, Value};
use crate::parser::{CompareOp, Projection, Query, WhereClause};

/// Evaluate a row against an optional WHERE comparison
///
/// Integer semantics apply only when the comparison value parses as an
/// integer AND the row's value is an integer. Otherwise the sole
/// supported comparison is string equality under `=`; ordering text is
/// unsupported and yields false, as does a column the row does not carry.
pub fn row_matches(row: &Row, clause: Option<&WhereClause>) -> bool {
    let clause = match clause {
        Some(clause) => clause,
        None => return true,
    };

    let value = match row.get(&clause.column) {
        Some(value) => value,
        None => return false,
    };

    if let (Some(bound), Value::Integer(cell)) = (clause.value_as_int(), value) {
        return match clause.op {
            CompareOp::Lt => *cell < bound,
            CompareOp::Eq => *cell == bound,
            CompareOp::Gt => *cell > bound,
        };
    }

    if clause.op == CompareOp::Eq {
        return value.to_string() == clause.value;
    }

    false
}

/// Apply a query's filter and projection to source rows
///
/// Rows are considered in input order. `source_columns` is the column
/// order of whatever the rows came from (a catalog table, or a cached
/// result) and is what `*` expands against. Projected columns absent
/// from a source row are silently dropped from that row.
pub fn evaluate(query: &Query, source_columns: &[String], rows: &[Row]) -> Table {
    let mut result_rows = Vec::new();
    for row in rows {
        if !row_matches(row, query.filter.as_ref()) {
            continue;
        }
        let projected = match &query.projection {
            Projection::Star => row.clone(),
            Projection::Columns(columns) => row.project(columns),
        };
        result_rows.push(projected);
    }

    Table::with_rows(
        "results",
        query.projection.expand(source_columns).to_vec(),
        result_rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;

    fn clause(column: &str, op: CompareOp, value: &str) -> WhereClause {
        WhereClause {
            column: column.to_string(),
            op,
            value: value.to_string(),
        }
    }

    fn user(id: i64, name: &str, age: i64) -> Row {
        Row::from_pairs([
            ("id", Value::integer(id)),
            ("name", Value::text(name)),
            ("age", Value::integer(age)),
        ])
    }

    #[test]
    fn test_no_clause_passes() {
        assert!(row_matches(&user(1, "Alice", 31), None));
    }

    #[test]
    fn test_integer_comparisons() {
        let row = user(1, "Alice", 31);
        assert!(row_matches(&row, Some(&clause("age", CompareOp::Gt, "30"))));
        assert!(row_matches(&row, Some(&clause("age", CompareOp::Lt, "40"))));
        assert!(row_matches(&row, Some(&clause("age", CompareOp::Eq, "31"))));
        assert!(!row_matches(&row, Some(&clause("age", CompareOp::Gt, "31"))));
    }

    #[test]
    fn test_missing_column_fails() {
        let row = user(1, "Alice", 31);
        assert!(!row_matches(
            &row,
            Some(&clause("email", CompareOp::Eq, "x"))
        ));
    }

    #[test]
    fn test_string_equality() {
        let row = user(1, "Alice", 31);
        assert!(row_matches(
            &row,
            Some(&clause("name", CompareOp::Eq, "Alice"))
        ));
        assert!(!row_matches(
            &row,
            Some(&clause("name", CompareOp::Eq, "Bob"))
        ));
    }

    #[test]
    fn test_text_ordering_unsupported() {
        let row = user(1, "Alice", 31);
        assert!(!row_matches(
            &row,
            Some(&clause("name", CompareOp::Gt, "Aaron"))
        ));
        assert!(!row_matches(
            &row,
            Some(&clause("name", CompareOp::Lt, "Zed"))
        ));
    }

    #[test]
    fn test_integer_cell_equals_numeric_string() {
        // Integer rule applies: "31" parses, cell is integer
        let row = user(1, "Alice", 31);
        assert!(row_matches(&row, Some(&clause("age", CompareOp::Eq, "31"))));
        // Non-numeric bound against an integer cell falls through to
        // string equality, which renders the cell bare
        assert!(!row_matches(
            &row,
            Some(&clause("age", CompareOp::Eq, "thirty"))
        ));
    }

    fn source_columns() -> Vec<String> {
        vec!["id".to_string(), "name".to_string(), "age".to_string()]
    }

    #[test]
    fn test_evaluate_filters_in_order() {
        let rows = vec![user(1, "Alice", 31), user(2, "Bob", 45), user(3, "Carol", 55)];
        let query = parse_query("SELECT * FROM users WHERE age > 40").unwrap();
        let result = evaluate(&query, &source_columns(), &rows);

        assert_eq!(result.columns, source_columns());
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows[0].get("name"), Some(&Value::text("Bob")));
        assert_eq!(result.rows[1].get("name"), Some(&Value::text("Carol")));
    }

    #[test]
    fn test_evaluate_projects_explicit_columns() {
        let rows = vec![user(1, "Alice", 31)];
        let query = parse_query("SELECT name FROM users").unwrap();
        let result = evaluate(&query, &source_columns(), &rows);

        assert_eq!(result.columns, vec!["name"]);
        assert_eq!(result.rows[0].len(), 1);
        assert!(result.rows[0].contains_column("name"));
    }

    #[test]
    fn test_evaluate_unknown_projection_column_dropped_from_rows() {
        let rows = vec![user(1, "Alice", 31)];
        let query = parse_query("SELECT name, email FROM users").unwrap();
        let result = evaluate(&query, &source_columns(), &rows);

        // The requested column list survives in the header; the missing
        // column simply contributes no value to the row
        assert_eq!(result.columns, vec!["name", "email"]);
        assert_eq!(result.rows[0].len(), 1);
    }

    #[test]
    fn test_evaluate_no_filter_keeps_all_rows() {
        let rows = vec![user(1, "Alice", 31), user(2, "Bob", 45)];
        let query = parse_query("SELECT * FROM users").unwrap();
        let result = evaluate(&query, &source_columns(), &rows);
        assert_eq!(result.row_count(), 2);
    }
}
