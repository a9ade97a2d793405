//! # Connection Pool
//!
//! Purpose: Reuse TCP connections to the store so callers pay the handshake
//! once, while keeping the pool an explicit, caller-owned value.
//!
//! ## Design Principles
//! 1. **Object Pool Pattern**: Keep a bounded set of reusable connections.
//! 2. **Minimal Locking**: Hold the mutex only while moving idle connections.
//! 3. **Fail Fast**: Exceeding the pool limit returns an error immediately.
//! 4. **RAII Checkout**: A `PooledConnection` goes back to the pool on drop,
//!    on every exit path, and is discarded instead if its stream broke.

use std::collections::VecDeque;
use std::io::{BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{trace, warn};

use crate::command::StoreConnection;
use crate::error::{ClientError, ClientResult};
use crate::resp::{encode_command, read_response, RespValue};

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Server address as `host:port`, e.g. "127.0.0.1:6379" or
    /// "redis.internal:6379". An empty host (":6379") means the local host.
    pub addr: String,
    /// Maximum number of idle connections to keep.
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

/// Point-in-time view of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    /// Connections parked and ready for reuse.
    pub idle: usize,
    /// Connections open in total, idle or checked out.
    pub total: usize,
}

struct PoolState {
    idle: VecDeque<Connection>,
    total: usize,
}

struct PoolInner {
    config: PoolConfig,
    addr: String,
    state: Mutex<PoolState>,
}

impl PoolInner {
    fn lock(&self) -> MutexGuard<'_, PoolState> {
        // Counters stay consistent even if a holder panicked mid-update.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release_slot(&self) {
        let mut state = self.lock();
        state.total = state.total.saturating_sub(1);
    }

    fn return_connection(&self, conn: Connection) {
        let mut state = self.lock();
        if state.idle.len() < self.config.max_idle {
            state.idle.push_back(conn);
            trace!(idle = state.idle.len(), total = state.total, "connection returned");
        } else {
            state.total = state.total.saturating_sub(1);
            trace!(total = state.total, "idle limit reached, connection closed");
        }
    }
}

/// Connection pool handle. Cloning shares the same pool.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    /// Creates a new connection pool. No connection is opened until the
    /// first `acquire`.
    pub fn new(config: PoolConfig) -> ClientResult<Self> {
        let addr = normalize_addr(&config.addr)?;
        let state = PoolState {
            idle: VecDeque::with_capacity(config.max_idle.min(64)),
            total: 0,
        };
        Ok(ConnectionPool {
            inner: Arc::new(PoolInner {
                config,
                addr,
                state: Mutex::new(state),
            }),
        })
    }

    /// Acquires a connection, reusing an idle one when available.
    pub fn acquire(&self) -> ClientResult<PooledConnection> {
        let idle = self.inner.lock().idle.pop_front();
        if let Some(conn) = idle {
            trace!("reusing idle connection");
            return Ok(PooledConnection::new(self.inner.clone(), conn));
        }

        if !self.try_reserve() {
            return Err(ClientError::PoolExhausted);
        }

        match Connection::connect(&self.inner.addr, &self.inner.config) {
            Ok(conn) => {
                trace!(addr = %self.inner.addr, "opened connection");
                Ok(PooledConnection::new(self.inner.clone(), conn))
            }
            Err(err) => {
                self.inner.release_slot();
                Err(err)
            }
        }
    }

    /// Returns current idle/total counts.
    pub fn status(&self) -> PoolStatus {
        let state = self.inner.lock();
        PoolStatus {
            idle: state.idle.len(),
            total: state.total,
        }
    }

    fn try_reserve(&self) -> bool {
        let mut state = self.inner.lock();
        if state.total >= self.inner.config.max_total {
            return false;
        }
        state.total += 1;
        true
    }
}

/// RAII wrapper returning a connection to the pool on drop.
pub struct PooledConnection {
    pool: Arc<PoolInner>,
    conn: Option<Connection>,
    valid: bool,
}

impl PooledConnection {
    fn new(pool: Arc<PoolInner>, conn: Connection) -> Self {
        PooledConnection {
            pool,
            conn: Some(conn),
            valid: true,
        }
    }
}

impl StoreConnection for PooledConnection {
    fn exec(&mut self, args: &[&[u8]]) -> ClientResult<RespValue> {
        let Some(conn) = self.conn.as_mut() else {
            return Err(ClientError::Protocol("connection already released"));
        };
        let response = conn.exec(args);
        if let Err(err) = &response {
            if err.breaks_connection() {
                // The stream may hold a half-read reply; never hand it out again.
                self.valid = false;
            }
        }
        response
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };

        if self.valid {
            self.pool.return_connection(conn);
        } else {
            warn!(addr = %self.pool.addr, "discarding broken connection");
            self.pool.release_slot();
        }
    }
}

/// Single TCP connection with reusable buffers.
struct Connection {
    // Buffered reader reduces syscalls while still allowing direct writes.
    reader: BufReader<TcpStream>,
    line_buf: Vec<u8>,
    write_buf: Vec<u8>,
}

impl Connection {
    fn connect(addr: &str, config: &PoolConfig) -> ClientResult<Self> {
        let stream = connect_stream(addr, config)?;
        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;
        // Disable Nagle to keep request latency low for small payloads.
        stream.set_nodelay(true)?;

        Ok(Connection {
            reader: BufReader::new(stream),
            line_buf: Vec::with_capacity(128),
            write_buf: Vec::with_capacity(256),
        })
    }

    fn exec(&mut self, args: &[&[u8]]) -> ClientResult<RespValue> {
        self.write_buf.clear();
        encode_command(args, &mut self.write_buf);

        let stream = self.reader.get_mut();
        stream.write_all(&self.write_buf)?;
        stream.flush()?;

        read_response(&mut self.reader, &mut self.line_buf)
    }
}

/// Checks `host:port` shape up front; name resolution waits for connect.
fn normalize_addr(raw: &str) -> ClientResult<String> {
    let invalid = || ClientError::InvalidAddress(raw.to_string());
    let (host, port) = raw.rsplit_once(':').ok_or_else(invalid)?;
    port.parse::<u16>().map_err(|_| invalid())?;
    if host.is_empty() {
        return Ok(format!("127.0.0.1:{port}"));
    }
    Ok(raw.to_string())
}

/// Resolves `addr` and tries each resolved address in turn.
fn connect_stream(addr: &str, config: &PoolConfig) -> ClientResult<TcpStream> {
    let mut last_err = None;
    for resolved in addr.to_socket_addrs()? {
        let attempt = match config.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&resolved, timeout),
            None => TcpStream::connect(resolved),
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(err) => {
                trace!(%resolved, error = %err, "connect attempt failed");
                last_err = Some(err);
            }
        }
    }
    Err(match last_err {
        Some(err) => ClientError::Io(err),
        None => ClientError::InvalidAddress(addr.to_string()),
    })
}
