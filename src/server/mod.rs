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

//! TCP server
//!
//! One thread per connection; requests on a connection are processed
//! sequentially so replies stay in order. The engine and KV store are
//! shared behind `Arc`s; the semantic cache inside the engine is the
//! only guarded mutable state on the query path.

pub mod command;
pub mod resp;

use std::io::{BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info};

use crate::core::{Error, Result};
use crate::executor::Engine;
use crate::storage::KvStore;

/// TCP server for the RESP command surface
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Bind to an address (use port 0 for an ephemeral port)
    pub fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self { listener })
    }

    /// The bound local address
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails
    ///
    /// Each connection gets its own thread; a per-connection failure
    /// drops only that connection.
    pub fn run(self, engine: Arc<Engine>, kv: Arc<KvStore>) -> Result<()> {
        info!(addr = %self.local_addr()?, "listening");

        for stream in self.listener.incoming() {
            let stream = stream?;
            let engine = engine.clone();
            let kv = kv.clone();
            thread::spawn(move || {
                let peer = stream
                    .peer_addr()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                if let Err(err) = handle_connection(stream, &engine, &kv) {
                    debug!(%peer, %err, "connection closed with error");
                } else {
                    debug!(%peer, "connection closed");
                }
            });
        }

        Ok(())
    }
}

/// Serve one connection until EOF or a fatal IO/protocol error
fn handle_connection(stream: TcpStream, engine: &Engine, kv: &KvStore) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);

    loop {
        let args = match resp::read_command(&mut reader) {
            Ok(Some(args)) => args,
            Ok(None) => return Ok(()),
            Err(Error::Protocol(message)) => {
                // Answer malformed framing, then give up on the stream;
                // we can no longer tell where the next frame starts
                resp::write_error(&mut writer, "invalid SQL command")?;
                writer.flush()?;
                return Err(Error::Protocol(message));
            }
            Err(err) => return Err(err),
        };

        command::dispatch(&args, engine, kv, &mut writer)?;
        writer.flush()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::EngineConfig;
    use crate::storage::Catalog;
    use std::io::{BufRead, Write as _};
    use std::time::Duration;

    fn spawn_server() -> SocketAddr {
        let engine = Arc::new(Engine::new(
            Arc::new(Catalog::with_sample_data()),
            EngineConfig::default().with_miss_penalty(Duration::ZERO),
        ));
        let kv = Arc::new(KvStore::new());
        let server = Server::bind("127.0.0.1:0").unwrap();
        let addr = server.local_addr().unwrap();
        thread::spawn(move || server.run(engine, kv));
        addr
    }

    #[test]
    fn test_ping_round_trip() {
        let addr = spawn_server();
        let stream = TcpStream::connect(addr).unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut writer = stream;

        writer.write_all(b"*1\r\n$4\r\nPING\r\n").unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "+PONG\r\n");
    }

    #[test]
    fn test_sequential_commands_on_one_connection() {
        let addr = spawn_server();
        let stream = TcpStream::connect(addr).unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut writer = stream;

        writer
            .write_all(b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n")
            .unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "+OK\r\n");

        writer.write_all(b"*2\r\n$3\r\nGET\r\n$1\r\nk\r\n").unwrap();
        let mut header = String::new();
        reader.read_line(&mut header).unwrap();
        assert_eq!(header, "$1\r\n");
        let mut payload = String::new();
        reader.read_line(&mut payload).unwrap();
        assert_eq!(payload, "v\r\n");
    }
}
