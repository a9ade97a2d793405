//! # Synchronous Client API
//!
//! Purpose: Expose a compact, blocking facade for issuing raw commands to the
//! store without handling pool checkout by hand.
//!
//! ## Design Principles
//! 1. **Facade Pattern**: `KVClient` hides pooling and protocol details.
//! 2. **Borrow-Friendly API**: Accept `&[u8]` to avoid unnecessary copies.
//! 3. **Scoped Checkout**: Each call holds a connection for exactly one command.

use std::time::Duration;

use crate::command;
use crate::error::ClientResult;
use crate::pool::{ConnectionPool, PoolConfig};

/// Configuration for the client and its pool.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address, e.g. "127.0.0.1:6379".
    pub addr: String,
    /// Maximum idle connections kept in the pool.
    pub max_idle: usize,
    /// Maximum total connections (idle + in-use).
    pub max_total: usize,
    /// Optional TCP read timeout.
    pub read_timeout: Option<Duration>,
    /// Optional TCP write timeout.
    pub write_timeout: Option<Duration>,
    /// Optional TCP connect timeout.
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            addr: "127.0.0.1:6379".to_string(),
            max_idle: 8,
            max_total: 16,
            read_timeout: None,
            write_timeout: None,
            connect_timeout: None,
        }
    }
}

impl From<ClientConfig> for PoolConfig {
    fn from(config: ClientConfig) -> Self {
        PoolConfig {
            addr: config.addr,
            max_idle: config.max_idle,
            max_total: config.max_total,
            read_timeout: config.read_timeout,
            write_timeout: config.write_timeout,
            connect_timeout: config.connect_timeout,
        }
    }
}

impl ClientConfig {
    /// Builds the connection pool described by this configuration.
    pub fn build_pool(self) -> ClientResult<ConnectionPool> {
        ConnectionPool::new(self.into())
    }
}

/// Synchronous client over a shared connection pool.
#[derive(Clone)]
pub struct KVClient {
    pool: ConnectionPool,
}

impl KVClient {
    /// Creates a client with default configuration.
    pub fn connect(addr: impl Into<String>) -> ClientResult<Self> {
        let config = ClientConfig {
            addr: addr.into(),
            ..ClientConfig::default()
        };
        Self::with_config(config)
    }

    /// Creates a client with a custom configuration.
    pub fn with_config(config: ClientConfig) -> ClientResult<Self> {
        Ok(KVClient {
            pool: config.build_pool()?,
        })
    }

    /// Wraps an existing pool, sharing it with other holders.
    pub fn with_pool(pool: ConnectionPool) -> Self {
        KVClient { pool }
    }

    /// Returns the underlying pool handle.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Fetches a value by key.
    ///
    /// Returns `Ok(None)` when the key is missing.
    pub fn get(&self, key: &[u8]) -> ClientResult<Option<Vec<u8>>> {
        let mut conn = self.pool.acquire()?;
        command::get(&mut conn, key)
    }

    /// Sets a value for a key without expiration.
    pub fn set(&self, key: &[u8], value: &[u8]) -> ClientResult<()> {
        let mut conn = self.pool.acquire()?;
        command::set(&mut conn, key, value)
    }

    /// Pings the server. Returns the raw response payload.
    pub fn ping(&self, payload: Option<&[u8]>) -> ClientResult<Vec<u8>> {
        let mut conn = self.pool.acquire()?;
        command::ping(&mut conn, payload)
    }
}
