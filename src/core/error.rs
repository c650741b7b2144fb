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

//! Error types for Sievedb
//!
//! This module defines all error types used throughout the server.

use thiserror::Error;

/// Result type alias for Sievedb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Sievedb operations
///
/// Every error is recovered per-request; none is fatal to the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Table not found in the backing catalog
    #[error("table '{0}' not found")]
    TableNotFound(String),

    /// Query could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Wire framing did not yield a recognizable command
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Cannot compare values of different types
    #[error("cannot compare incompatible types")]
    IncomparableTypes,

    /// IO error (wrapped)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error for unexpected conditions
    #[error("{message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Create a new Protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Error::Protocol(message.into())
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Error::Io {
            message: message.into(),
        }
    }

    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TableNotFound(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}
