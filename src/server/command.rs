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

//! Command dispatch
//!
//! Commands are matched case-insensitively on the first argument; the
//! query surface requires the `SQL` command name and takes the second
//! argument verbatim as the query text. There is no content sniffing.

use std::io::Write;

use crate::core::Error;
use crate::executor::Engine;
use crate::storage::KvStore;

use super::resp;

/// Handle one decoded command and write the reply
pub fn dispatch(
    args: &[String],
    engine: &Engine,
    kv: &KvStore,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let name = match args.first() {
        Some(name) => name.as_str(),
        None => return Ok(()), // blank inline line; nothing to answer
    };

    if name.eq_ignore_ascii_case("SQL") {
        return handle_sql(args, engine, out);
    }
    if name.eq_ignore_ascii_case("SQLSTATS") {
        return resp::write_bulk(out, &engine.stats_report());
    }
    if name.eq_ignore_ascii_case("PING") {
        return match args.len() {
            1 => resp::write_simple(out, "PONG"),
            2 => resp::write_bulk(out, &args[1]),
            _ => resp::write_error(out, "wrong number of arguments for 'ping' command"),
        };
    }
    if name.eq_ignore_ascii_case("SET") {
        if args.len() != 3 {
            return resp::write_error(out, "wrong number of arguments for 'set' command");
        }
        kv.set(args[1].clone(), args[2].clone());
        return resp::write_simple(out, "OK");
    }
    if name.eq_ignore_ascii_case("GET") {
        if args.len() != 2 {
            return resp::write_error(out, "wrong number of arguments for 'get' command");
        }
        return match kv.get(&args[1]) {
            Some(value) => resp::write_bulk(out, &value),
            None => resp::write_nil(out),
        };
    }
    if name.eq_ignore_ascii_case("DEL") {
        if args.len() < 2 {
            return resp::write_error(out, "wrong number of arguments for 'del' command");
        }
        let removed = kv.delete(args[1..].iter().map(String::as_str));
        return resp::write_integer(out, removed as i64);
    }

    resp::write_error(out, &format!("unknown command '{}'", name))
}

/// Handle `SQL <query-text>`
fn handle_sql(args: &[String], engine: &Engine, out: &mut impl Write) -> std::io::Result<()> {
    if args.len() != 2 {
        return resp::write_error(out, "invalid SQL command");
    }

    match engine.execute(&args[1]) {
        Ok(outcome) => {
            if outcome.results.is_empty() {
                resp::write_nil(out)
            } else {
                resp::write_bulk(out, &outcome.results.render_text())
            }
        }
        Err(Error::Parse(_)) => {
            resp::write_error(out, "invalid or unsupported SQL query format")
        }
        Err(err) => resp::write_error(out, &err.to_string()),
    }
}
