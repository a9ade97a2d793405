//! # Store Commands
//!
//! Purpose: Define the request/response seam (`StoreConnection`) and the
//! commands issued through it, interpreting each reply shape exactly once.

use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::resp::RespValue;

/// A connection able to dispatch one command and return its single reply.
///
/// Implemented by pooled TCP connections; anything else that speaks the same
/// request/response contract (for example an in-memory double) can stand in.
pub trait StoreConnection {
    /// Sends `args` as one command and reads one reply.
    fn exec(&mut self, args: &[&[u8]]) -> ClientResult<RespValue>;
}

impl<C: StoreConnection + ?Sized> StoreConnection for &mut C {
    fn exec(&mut self, args: &[&[u8]]) -> ClientResult<RespValue> {
        (**self).exec(args)
    }
}

/// Fetches a value by key.
///
/// Returns `Ok(None)` when the server answers with the null bulk reply.
pub fn get<C: StoreConnection + ?Sized>(conn: &mut C, key: &[u8]) -> ClientResult<Option<Vec<u8>>> {
    let reply = conn.exec(&[b"GET", key])?;
    debug!(command = "GET", reply = reply.kind());
    match reply {
        RespValue::Bulk(data) => Ok(data),
        RespValue::Error(message) => Err(ClientError::Server { message }),
        _ => Err(ClientError::UnexpectedResponse { command: "GET" }),
    }
}

/// Sets a value for a key without expiration.
pub fn set<C: StoreConnection + ?Sized>(conn: &mut C, key: &[u8], value: &[u8]) -> ClientResult<()> {
    let reply = conn.exec(&[b"SET", key, value])?;
    debug!(command = "SET", reply = reply.kind(), value_len = value.len());
    match reply {
        RespValue::Simple(status) if status == b"OK" => Ok(()),
        RespValue::Error(message) => Err(ClientError::Server { message }),
        _ => Err(ClientError::UnexpectedResponse { command: "SET" }),
    }
}

/// Pings the server. Returns `PONG`, or the echoed payload when one is given.
pub fn ping<C: StoreConnection + ?Sized>(conn: &mut C, payload: Option<&[u8]>) -> ClientResult<Vec<u8>> {
    let reply = match payload {
        Some(data) => conn.exec(&[b"PING", data])?,
        None => conn.exec(&[b"PING"])?,
    };
    debug!(command = "PING", reply = reply.kind());
    match reply {
        RespValue::Simple(text) => Ok(text),
        RespValue::Bulk(Some(data)) => Ok(data),
        RespValue::Error(message) => Err(ClientError::Server { message }),
        _ => Err(ClientError::UnexpectedResponse { command: "PING" }),
    }
}
