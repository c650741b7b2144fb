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

//! RESP wire codec
//!
//! Commands arrive as length-prefixed arrays of bulk strings
//! (`*2\r\n$3\r\nSQL\r\n$19\r\nSELECT * FROM users\r\n`). Inline
//! commands (a bare space-separated line) are also accepted for
//! telnet-style testing. Replies are simple strings, errors, integers,
//! and (possibly nil) bulk strings.

use std::io::{BufRead, Write};

use crate::core::{Error, Result};

/// Largest accepted command array / bulk payload; guards against
/// malformed length prefixes pinning a connection thread
const MAX_ARRAY_LEN: usize = 64;
const MAX_BULK_LEN: usize = 1024 * 1024;

/// Read one command as a list of argument strings
///
/// Returns `Ok(None)` on a clean disconnect at a frame boundary. An
/// empty inline line reads as an empty argument list, which the caller
/// may ignore.
pub fn read_command(reader: &mut impl BufRead) -> Result<Option<Vec<String>>> {
    let line = match read_line(reader)? {
        Some(line) => line,
        None => return Ok(None),
    };

    if let Some(rest) = line.strip_prefix('*') {
        let count: usize = rest
            .parse()
            .map_err(|_| Error::protocol(format!("bad array length: {:?}", rest)))?;
        if count > MAX_ARRAY_LEN {
            return Err(Error::protocol(format!("array too long: {}", count)));
        }

        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            args.push(read_bulk(reader)?);
        }
        return Ok(Some(args));
    }

    // Inline command
    Ok(Some(line.split_whitespace().map(str::to_string).collect()))
}

/// Read one `$<len>\r\n<bytes>\r\n` bulk string
fn read_bulk(reader: &mut impl BufRead) -> Result<String> {
    let header = read_line(reader)?
        .ok_or_else(|| Error::protocol("unexpected end of stream in bulk header"))?;

    let rest = header
        .strip_prefix('$')
        .ok_or_else(|| Error::protocol(format!("expected bulk header, got {:?}", header)))?;
    let len: usize = rest
        .parse()
        .map_err(|_| Error::protocol(format!("bad bulk length: {:?}", rest)))?;
    if len > MAX_BULK_LEN {
        return Err(Error::protocol(format!("bulk too long: {}", len)));
    }

    let mut payload = vec![0u8; len + 2];
    reader
        .read_exact(&mut payload)
        .map_err(|e| Error::io(e.to_string()))?;
    if &payload[len..] != b"\r\n" {
        return Err(Error::protocol("bulk payload not terminated by CRLF"));
    }
    payload.truncate(len);

    String::from_utf8(payload).map_err(|_| Error::protocol("bulk payload is not valid UTF-8"))
}

/// Read one CRLF-terminated line; `None` on EOF before any byte
fn read_line(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(|e| Error::io(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }

    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Write a simple string reply: `+<text>\r\n`
pub fn write_simple(writer: &mut impl Write, text: &str) -> std::io::Result<()> {
    write!(writer, "+{}\r\n", text)
}

/// Write an error reply: `-ERR <message>\r\n`
pub fn write_error(writer: &mut impl Write, message: &str) -> std::io::Result<()> {
    write!(writer, "-ERR {}\r\n", message)
}

/// Write a bulk string reply: `$<len>\r\n<text>\r\n`
pub fn write_bulk(writer: &mut impl Write, text: &str) -> std::io::Result<()> {
    write!(writer, "${}\r\n{}\r\n", text.len(), text)
}

/// Write the nil bulk string: `$-1\r\n`
pub fn write_nil(writer: &mut impl Write) -> std::io::Result<()> {
    write!(writer, "$-1\r\n")
}

/// Write an integer reply: `:<n>\r\n`
pub fn write_integer(writer: &mut impl Write, value: i64) -> std::io::Result<()> {
    write!(writer, ":{}\r\n", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn read_from(input: &str) -> Result<Option<Vec<String>>> {
        read_command(&mut BufReader::new(input.as_bytes()))
    }

    #[test]
    fn test_read_array_command() {
        let wire = "*2\r\n$3\r\nSQL\r\n$19\r\nSELECT * FROM users\r\n";
        let args = read_from(wire).unwrap().unwrap();
        assert_eq!(args, vec!["SQL", "SELECT * FROM users"]);
    }

    #[test]
    fn test_read_single_element_array() {
        let args = read_from("*1\r\n$8\r\nSQLSTATS\r\n").unwrap().unwrap();
        assert_eq!(args, vec!["SQLSTATS"]);
    }

    #[test]
    fn test_read_inline_command() {
        let args = read_from("PING\r\n").unwrap().unwrap();
        assert_eq!(args, vec!["PING"]);

        let args = read_from("SET greeting hello\r\n").unwrap().unwrap();
        assert_eq!(args, vec!["SET", "greeting", "hello"]);
    }

    #[test]
    fn test_read_eof_is_clean_disconnect() {
        assert_eq!(read_from("").unwrap(), None);
    }

    #[test]
    fn test_read_bulk_preserves_spaces() {
        let wire = "*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$11\r\nhello world\r\n";
        let args = read_from(wire).unwrap().unwrap();
        assert_eq!(args[2], "hello world");
    }

    #[test]
    fn test_read_rejects_bad_lengths() {
        assert!(read_from("*x\r\n").is_err());
        assert!(read_from("*1\r\n$x\r\n").is_err());
        assert!(read_from("*1\r\nnope\r\n").is_err());
    }

    #[test]
    fn test_read_rejects_truncated_bulk() {
        assert!(read_from("*1\r\n$10\r\nshort\r\n").is_err());
    }

    #[test]
    fn test_write_replies() {
        let mut out = Vec::new();
        write_simple(&mut out, "PONG").unwrap();
        write_error(&mut out, "table 'x' not found").unwrap();
        write_bulk(&mut out, "hi").unwrap();
        write_nil(&mut out).unwrap();
        write_integer(&mut out, 2).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "+PONG\r\n-ERR table 'x' not found\r\n$2\r\nhi\r\n$-1\r\n:2\r\n"
        );
    }
}
