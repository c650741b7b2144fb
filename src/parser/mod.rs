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

//! Query parser
//!
//! This module provides the parser for the restricted query surface:
//!
//! - [`Lexer`] - tokenizer for query input
//! - [`Parser`] - parser that builds the AST from tokens
//! - [`ast`] - abstract syntax tree types
//! - [`token`] - token types
//! - [`error`] - parser error types
//!
//! # Example
//!
//! ```
//! use sievedb::parser::parse_query;
//!
//! let query = parse_query("SELECT name FROM users WHERE age > 40").unwrap();
//! assert_eq!(query.table, "users");
//! assert!(query.filter.is_some());
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod token;

pub use ast::{CompareOp, Projection, Query, WhereClause};
pub use error::ParseError;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Position, Token, TokenType};

/// Parse a query string
///
/// The input is trimmed and a single trailing semicolon is removed; the
/// resulting string becomes the query's `original_text`, which serves as
/// the cache's direct-lookup key.
///
/// # Errors
///
/// Returns [`ParseError`] when the input matches neither grammatical
/// shape. Table and column existence are not checked here.
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    let canonical = input.trim();
    let canonical = canonical
        .strip_suffix(';')
        .map(str::trim_end)
        .unwrap_or(canonical);

    let parts = Parser::new(canonical).parse_parts()?;

    Ok(Query {
        original_text: canonical.to_string(),
        projection: parts.projection,
        table: parts.table,
        filter: parts.filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_canonical_text() {
        let query = parse_query("  SELECT * FROM users WHERE age > 40 ; ").unwrap();
        assert_eq!(query.original_text, "SELECT * FROM users WHERE age > 40");
    }

    #[test]
    fn test_parse_query_shapes() {
        assert!(parse_query("SELECT * FROM users").is_ok());
        assert!(parse_query("SELECT name,age FROM users WHERE age < 30").is_ok());
        assert!(parse_query("select id from products where item = 'apple'").is_ok());
    }

    #[test]
    fn test_parse_query_rejects_garbage() {
        assert!(parse_query("").is_err());
        assert!(parse_query("DROP TABLE users").is_err());
        assert!(parse_query("SELECT FROM users").is_err());
        assert!(parse_query("SELECT * FROM users WHERE age >").is_err());
    }

    #[test]
    fn test_parse_query_keeps_inner_semicolons_out_of_key() {
        let query = parse_query("SELECT * FROM users;").unwrap();
        assert_eq!(query.original_text, "SELECT * FROM users");
    }
}
