//! # RecordKV Store Client
//!
//! Purpose: Provide the synchronous, Redis-compatible connection layer the
//! typed record store runs on: RESP2 framing, pooled TCP connections, and the
//! handful of commands the store issues.
//!
//! ## Design Principles
//! 1. **Object Pool Pattern**: Reuse TCP connections to avoid repeated connects.
//! 2. **Caller-Owned Pools**: Pools are built explicitly and passed by handle.
//! 3. **One Seam**: Everything above this crate talks to `StoreConnection`.
//! 4. **Protocol Clarity**: Encode/parse RESP2 explicitly for correctness.

mod client;
mod command;
mod error;
mod pool;
mod resp;

pub use client::{ClientConfig, KVClient};
pub use command::{get, ping, set, StoreConnection};
pub use error::{ClientError, ClientResult};
pub use pool::{ConnectionPool, PoolConfig, PoolStatus, PooledConnection};
pub use resp::{encode_command, read_response, RespValue};
