//! # RESP2 Encoding and Parsing
//!
//! Purpose: Encode store commands and parse single replies, keeping the
//! framing rules in one place.
//!
//! ## Design Principles
//! 1. **State-Free Parsing**: Replies are parsed top-down with minimal state.
//! 2. **Buffer Reuse**: Caller provides buffers to avoid per-call allocations.
//! 3. **Binary-Safe**: Bulk strings are treated as raw bytes.
//! 4. **Fail Fast**: Invalid framing returns protocol errors immediately.
//!
//! ## Wire Shapes
//!
//! ```text
//! request:  *3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n
//! replies:  +OK\r\n | -ERR msg\r\n | :42\r\n | $5\r\nhello\r\n | $-1\r\n | *N\r\n...
//! ```

use std::io::BufRead;

use crate::error::{ClientError, ClientResult};

/// Upper bound on a single bulk payload (matches the Redis default of 512MB).
const MAX_BULK_LEN: i64 = 512 * 1024 * 1024;

/// RESP reply value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// +OK or +PONG style replies.
    Simple(Vec<u8>),
    /// -ERR ... replies.
    Error(Vec<u8>),
    /// :123 replies.
    Integer(i64),
    /// $... bulk strings, with None for the null bulk (key absent).
    Bulk(Option<Vec<u8>>),
    /// *... arrays.
    Array(Vec<RespValue>),
}

impl RespValue {
    /// Short reply kind name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RespValue::Simple(_) => "simple",
            RespValue::Error(_) => "error",
            RespValue::Integer(_) => "integer",
            RespValue::Bulk(Some(_)) => "bulk",
            RespValue::Bulk(None) => "nil",
            RespValue::Array(_) => "array",
        }
    }
}

/// Encodes a RESP2 array command into the provided buffer.
pub fn encode_command(args: &[&[u8]], out: &mut Vec<u8>) {
    out.push(b'*');
    push_decimal(out, args.len());
    out.extend_from_slice(b"\r\n");
    for arg in args {
        out.push(b'$');
        push_decimal(out, arg.len());
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(arg);
        out.extend_from_slice(b"\r\n");
    }
}

/// Reads one RESP value from the buffered reader.
pub fn read_response<R: BufRead>(reader: &mut R, line_buf: &mut Vec<u8>) -> ClientResult<RespValue> {
    read_line(reader, line_buf)?;
    let Some((&tag, rest)) = line_buf.split_first() else {
        return Err(ClientError::Protocol("empty reply line"));
    };

    match tag {
        b'+' => Ok(RespValue::Simple(rest.to_vec())),
        b'-' => Ok(RespValue::Error(rest.to_vec())),
        b':' => Ok(RespValue::Integer(parse_i64(rest)?)),
        b'$' => {
            let len = parse_i64(rest)?;
            read_bulk(reader, len, line_buf)
        }
        b'*' => {
            let len = parse_i64(rest)?;
            read_array(reader, len, line_buf)
        }
        _ => Err(ClientError::Protocol("unknown reply type")),
    }
}

fn read_bulk<R: BufRead>(reader: &mut R, len: i64, line_buf: &mut Vec<u8>) -> ClientResult<RespValue> {
    if len == -1 {
        return Ok(RespValue::Bulk(None));
    }
    if !(0..=MAX_BULK_LEN).contains(&len) {
        return Err(ClientError::Protocol("invalid bulk length"));
    }
    let mut data = vec![0u8; len as usize];
    reader.read_exact(&mut data)?;

    let mut crlf = [0u8; 2];
    reader.read_exact(&mut crlf)?;
    if crlf != *b"\r\n" {
        return Err(ClientError::Protocol("bulk string missing CRLF"));
    }

    line_buf.clear();
    Ok(RespValue::Bulk(Some(data)))
}

fn read_array<R: BufRead>(reader: &mut R, len: i64, line_buf: &mut Vec<u8>) -> ClientResult<RespValue> {
    // Null array (*-1) carries no elements; treat it like an empty one.
    if len <= 0 {
        return Ok(RespValue::Array(Vec::new()));
    }

    let mut items = Vec::with_capacity(len.min(1024) as usize);
    for _ in 0..len {
        items.push(read_response(reader, line_buf)?);
    }
    Ok(RespValue::Array(items))
}

fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> ClientResult<()> {
    buf.clear();
    let bytes = reader.read_until(b'\n', buf)?;
    if bytes == 0 {
        return Err(ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed by server",
        )));
    }
    if !buf.ends_with(b"\r\n") {
        return Err(ClientError::Protocol("reply line missing CRLF"));
    }
    buf.truncate(buf.len() - 2);
    Ok(())
}

fn parse_i64(data: &[u8]) -> ClientResult<i64> {
    let (negative, digits) = match data.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, data),
    };
    if digits.is_empty() {
        return Err(ClientError::Protocol("empty integer"));
    }

    let mut value: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(ClientError::Protocol("invalid integer"));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as i64))
            .ok_or(ClientError::Protocol("integer overflow"))?;
    }

    Ok(if negative { -value } else { value })
}

fn push_decimal(out: &mut Vec<u8>, mut value: usize) {
    // Digits land in a stack buffer in reverse, then copy out in order.
    let mut buf = [0u8; 20];
    let mut len = 0;
    loop {
        buf[len] = b'0' + (value % 10) as u8;
        value /= 10;
        len += 1;
        if value == 0 {
            break;
        }
    }
    out.extend(buf[..len].iter().rev());
}
