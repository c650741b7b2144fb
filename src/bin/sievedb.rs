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

//! Sievedb server - RESP endpoint over the semantic query cache
//!

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sievedb::executor::{Engine, EngineConfig};
use sievedb::server::Server;
use sievedb::storage::{Catalog, KvStore};

/// Version string constant
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sievedb data server
#[derive(Parser, Debug)]
#[command(name = "sievedb")]
#[command(author = "Sievedb Contributors")]
#[command(version = VERSION)]
#[command(about = "Redis-protocol mini data server with a semantic SQL result cache")]
#[command(
    long_about = "Sievedb serves a restricted SQL surface over the Redis wire protocol.\n\
Query results are cached; a query whose predicate is subsumed by a cached\n\
query's predicate is answered by re-filtering the cached rows locally,\n\
skipping the (simulated) trip to the backing store.\n\n\
COMMANDS:\n\
  SQL <query>    run a query        SQLSTATS       cache statistics\n\
  PING           liveness check     SET/GET/DEL    plain key/value\n\n\
EXAMPLES:\n\
  sievedb                                  Listen on 127.0.0.1:6380\n\
  sievedb -a 0.0.0.0:7000 -c 16            Bigger cache on a public port\n\
  sievedb --miss-penalty-ms 0              Disable the artificial miss delay"
)]
struct Args {
    /// Listen address
    #[arg(short = 'a', long = "addr", default_value = "127.0.0.1:6380")]
    addr: String,

    /// Maximum number of cached query results
    #[arg(short = 'c', long = "capacity", default_value = "5")]
    capacity: usize,

    /// Simulated backing-store delay charged to each cache miss, in
    /// milliseconds
    #[arg(long = "miss-penalty-ms", default_value = "100")]
    miss_penalty_ms: u64,

    /// Suppress the startup banner
    #[arg(short = 'q', long = "quiet", default_value = "false")]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = EngineConfig::default()
        .with_cache_capacity(args.capacity)
        .with_miss_penalty(Duration::from_millis(args.miss_penalty_ms));

    let catalog = Arc::new(Catalog::with_sample_data());
    let engine = Arc::new(Engine::new(catalog, config));
    let kv = Arc::new(KvStore::new());

    let server = match Server::bind(&args.addr) {
        Ok(server) => server,
        Err(err) => {
            eprintln!("sievedb: cannot bind {}: {}", args.addr, err);
            return ExitCode::FAILURE;
        }
    };

    if !args.quiet {
        let addr = server
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| args.addr.clone());
        println!("Sievedb v{}", VERSION);
        println!(
            "Listening on {} (cache capacity {}, miss penalty {} ms)",
            addr, args.capacity, args.miss_penalty_ms
        );
        println!("Try: SQL 'SELECT * FROM users WHERE age > 40'");
    }

    if let Err(err) = server.run(engine, kv) {
        eprintln!("sievedb: server error: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
