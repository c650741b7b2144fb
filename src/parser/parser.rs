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

//! Query parser - recursive descent over the lexer's token stream
//!
//! Accepts exactly two grammatical shapes:
//!
//! ```text
//! SELECT <cols> FROM <ident> WHERE <ident> <op> <literal>
//! SELECT <cols> FROM <ident>
//! ```
//!
//! The parser does not validate table or column existence.

use super::ast::{CompareOp, Projection, WhereClause};
use super::error::ParseError;
use super::lexer::Lexer;
use super::token::{Token, TokenType};

/// Parser for the restricted query grammar
pub struct Parser {
    /// The lexer providing tokens
    lexer: Lexer,
    /// Current token being examined
    cur_token: Token,
    /// Next token (peek)
    peek_token: Token,
}

/// The grammatical parts of a query, before the canonical text is attached
pub(crate) struct ParsedParts {
    pub projection: Projection,
    pub table: String,
    pub filter: Option<WhereClause>,
}

impl Parser {
    /// Create a new parser for the given input
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer::new(input);
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        Parser {
            lexer,
            cur_token,
            peek_token,
        }
    }

    /// Advance to the next token
    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    /// Parse the full input as a single query
    pub(crate) fn parse_parts(&mut self) -> Result<ParsedParts, ParseError> {
        self.expect_keyword("SELECT")?;
        let projection = self.parse_projection()?;
        self.expect_keyword("FROM")?;
        let table = self.expect_identifier("table name")?;

        let filter = if self.cur_token.is_keyword("WHERE") {
            self.next_token();
            Some(self.parse_where_clause()?)
        } else {
            None
        };

        // Trailing semicolon is tolerated
        if self.cur_token.is_punctuator(";") {
            self.next_token();
        }

        if !self.cur_token.is_eof() {
            return Err(ParseError::new(
                format!("unexpected {} after query", self.cur_token),
                self.cur_token.position,
            ));
        }

        Ok(ParsedParts {
            projection,
            table,
            filter,
        })
    }

    /// Parse `*` or a comma-separated column list
    fn parse_projection(&mut self) -> Result<Projection, ParseError> {
        if self.cur_token.is_operator("*") {
            self.next_token();
            return Ok(Projection::Star);
        }

        let mut columns = vec![self.expect_identifier("column name")?];
        while self.cur_token.is_punctuator(",") {
            self.next_token();
            columns.push(self.expect_identifier("column name")?);
        }

        Ok(Projection::Columns(columns))
    }

    /// Parse `<ident> <op> <literal>`
    fn parse_where_clause(&mut self) -> Result<WhereClause, ParseError> {
        let column = self.expect_identifier("condition column")?;
        let op = self.expect_compare_op()?;
        let value = self.expect_literal()?;

        Ok(WhereClause { column, op, value })
    }

    /// Consume the expected keyword or fail
    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.cur_token.is_keyword(keyword) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::new(
                format!("expected {}, found {}", keyword, self.cur_token),
                self.cur_token.position,
            ))
        }
    }

    /// Consume an identifier token, returning its literal
    fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        if self.cur_token.token_type == TokenType::Identifier {
            let literal = std::mem::take(&mut self.cur_token.literal);
            self.next_token();
            Ok(literal)
        } else {
            Err(ParseError::new(
                format!("expected {}, found {}", what, self.cur_token),
                self.cur_token.position,
            ))
        }
    }

    /// Consume one of `<`, `=`, `>`
    fn expect_compare_op(&mut self) -> Result<CompareOp, ParseError> {
        let op = match self.cur_token.literal.as_str() {
            "<" if self.cur_token.token_type == TokenType::Operator => CompareOp::Lt,
            "=" if self.cur_token.token_type == TokenType::Operator => CompareOp::Eq,
            ">" if self.cur_token.token_type == TokenType::Operator => CompareOp::Gt,
            _ => {
                return Err(ParseError::new(
                    format!("expected comparison operator, found {}", self.cur_token),
                    self.cur_token.position,
                ))
            }
        };
        self.next_token();
        Ok(op)
    }

    /// Consume a literal: a number (optionally negative), a quoted string,
    /// or an unquoted word
    fn expect_literal(&mut self) -> Result<String, ParseError> {
        // Negative numbers arrive as a `-` operator followed by a number
        if self.cur_token.is_operator("-") && self.peek_token.token_type == TokenType::Number {
            self.next_token();
            let literal = format!("-{}", self.cur_token.literal);
            self.next_token();
            return Ok(literal);
        }

        match self.cur_token.token_type {
            TokenType::Number | TokenType::String | TokenType::Identifier => {
                let literal = std::mem::take(&mut self.cur_token.literal);
                self.next_token();
                Ok(literal)
            }
            _ => Err(ParseError::new(
                format!("expected literal value, found {}", self.cur_token),
                self.cur_token.position,
            )),
        }
    }
}
