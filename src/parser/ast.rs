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

//! Abstract syntax tree for the restricted query surface
//!
//! A parsed query is a projection, a table name, and at most one
//! single-column comparison.

use std::fmt;

/// Comparison operator in a WHERE clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Less than (<)
    Lt,
    /// Equality (=)
    Eq,
    /// Greater than (>)
    Gt,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Eq => write!(f, "="),
            CompareOp::Gt => write!(f, ">"),
        }
    }
}

/// The projected column set of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*` - all columns of the source table
    Star,
    /// Explicit, non-empty, ordered column list
    Columns(Vec<String>),
}

impl Projection {
    /// Expand the projection against a source column order
    ///
    /// `Star` yields the source order; an explicit list is returned as-is,
    /// whether or not its columns exist in the source.
    pub fn expand<'a>(&'a self, source_columns: &'a [String]) -> &'a [String] {
        match self {
            Projection::Star => source_columns,
            Projection::Columns(cols) => cols,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Star => write!(f, "*"),
            Projection::Columns(cols) => write!(f, "{}", cols.join(", ")),
        }
    }
}

/// A single-column comparison: `column op value`
///
/// The value is stored lexically; integer semantics are inferred on
/// demand by an attempted parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    /// Column name (case-sensitive)
    pub column: String,
    /// Comparison operator
    pub op: CompareOp,
    /// Comparison value, stored lexically
    pub value: String,
}

impl WhereClause {
    /// Attempt to read the comparison value with integer semantics
    pub fn value_as_int(&self) -> Option<i64> {
        self.value.parse().ok()
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op, self.value)
    }
}

/// A parsed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Canonical input text: trimmed, trailing semicolon stripped.
    /// This string is the direct-lookup cache key.
    pub original_text: String,
    /// Projected columns
    pub projection: Projection,
    /// Source table name
    pub table: String,
    /// Optional WHERE comparison
    pub filter: Option<WhereClause>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.projection, self.table)?;
        if let Some(clause) = &self.filter {
            write!(f, " WHERE {}", clause)?;
        }
        Ok(())
    }
}
