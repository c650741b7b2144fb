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

//! Query subsumption
//!
//! Decides whether a new query's result set is a subset of a cached
//! query's result set, over table, projection, and predicate. When it
//! is, the new query can be answered by re-filtering the cached rows
//! without touching the backing store.
//!
//! # Key insight
//!
//! If the cached predicate is LESS restrictive than the new predicate,
//! the new result is a subset of the cached one:
//!
//! ```text
//! cached: SELECT * FROM users WHERE age > 40   (8 rows held)
//! new:    SELECT name FROM users WHERE age > 50
//!
//! age > 50 is stricter than age > 40, and {name} ⊆ all columns,
//! so the new result is computable from the cached rows.
//! ```
//!
//! Only the operator pairs whose set inclusion on a totally ordered
//! integer column is unconditional are accepted; anything else (GT vs
//! LT, text orderings, mismatched columns) must re-execute.

use crate::parser::{CompareOp, Projection, Query, WhereClause};

/// Check whether `cached` subsumes `new`: every row of `new`'s ideal
/// result is present in `cached`'s result, with every projected column
/// of `new` available there
pub fn subsumes(cached: &Query, new: &Query) -> bool {
    if cached.table != new.table {
        return false;
    }

    if !projection_covers(&cached.projection, &new.projection) {
        return false;
    }

    clause_subsumes(new.filter.as_ref(), cached.filter.as_ref())
}

/// Check whether every column the new query projects is present in the
/// cached output
fn projection_covers(cached: &Projection, new: &Projection) -> bool {
    match cached {
        // Cached rows carry every column; any projection is answerable
        Projection::Star => true,
        Projection::Columns(cached_cols) => match new {
            // `*` needs columns the cached projection already dropped
            Projection::Star => false,
            Projection::Columns(new_cols) => {
                new_cols.iter().all(|col| cached_cols.contains(col))
            }
        },
    }
}

/// Check whether the new predicate selects a subset of what the cached
/// predicate selected
pub fn clause_subsumes(new: Option<&WhereClause>, cached: Option<&WhereClause>) -> bool {
    let cached = match cached {
        // Cached query covered the whole table
        None => return true,
        Some(cached) => cached,
    };

    let new = match new {
        // New query asks for a superset of the cached filter
        None => return false,
        Some(new) => new,
    };

    if new.column != cached.column {
        return false;
    }

    if let (Some(new_val), Some(cached_val)) = (new.value_as_int(), cached.value_as_int()) {
        return match (new.op, cached.op) {
            (CompareOp::Gt, CompareOp::Gt) => new_val >= cached_val,
            (CompareOp::Lt, CompareOp::Lt) => new_val <= cached_val,
            (CompareOp::Eq, CompareOp::Gt) => new_val > cached_val,
            (CompareOp::Eq, CompareOp::Lt) => new_val < cached_val,
            (CompareOp::Eq, CompareOp::Eq) => new_val == cached_val,
            _ => false,
        };
    }

    // Without integer semantics the only provable containment is
    // identical equality predicates
    new.op == CompareOp::Eq && cached.op == CompareOp::Eq && new.value == cached.value
}
