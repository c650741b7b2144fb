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

//! Core types and definitions for Sievedb
//!
//! This module contains the fundamental types used throughout the server:
//!
//! - [`Value`] - tagged scalar cell values (integer or text)
//! - [`Row`] - a sparse mapping from column name to value
//! - [`Table`] - named, ordered rows plus a canonical column order
//! - [`Error`] - error types for all operations

pub mod error;
pub mod row;
pub mod table;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use row::Row;
pub use table::Table;
pub use value::Value;
