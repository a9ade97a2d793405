//! # Pool-Backed Facade
//!
//! `TypedStore` checks a connection out of a caller-owned pool for each
//! operation and returns it when the call finishes, on success or error.

use rkv_client::{self as client, ClientConfig, ConnectionPool, StoreConnection};

use crate::error::StoreResult;
use crate::key::Namespace;
use crate::lookup::Lookup;
use crate::record::Record;
use crate::scalar::{FromScalar, ToScalar};
use crate::store;

/// Typed store over a shared connection pool.
#[derive(Clone)]
pub struct TypedStore {
    pool: ConnectionPool,
}

impl TypedStore {
    /// Wraps an existing pool. Clones of the pool handle share connections.
    pub fn new(pool: ConnectionPool) -> Self {
        TypedStore { pool }
    }

    /// Builds a pool from `config` and wraps it.
    pub fn connect(config: ClientConfig) -> StoreResult<Self> {
        Ok(TypedStore::new(config.build_pool()?))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn put_scalar<V: ToScalar + ?Sized>(&self, key: &str, value: &V) -> StoreResult<()> {
        store::check_key(key)?;
        let mut conn = self.pool.acquire()?;
        store::put_scalar(&mut conn, key, value)
    }

    pub fn get_scalar<V: FromScalar>(&self, key: &str) -> StoreResult<Lookup<V>> {
        store::check_key(key)?;
        let mut conn = self.pool.acquire()?;
        store::get_scalar(&mut conn, key)
    }

    pub fn put_record<R: Record>(&self, namespace: &Namespace, identity: &str, record: &R) -> StoreResult<()> {
        // Encode first so a bad record never costs a connection.
        let (key, encoded) = store::prepare_record(namespace, identity, record)?;
        let mut conn = self.pool.acquire()?;
        put_encoded(&mut conn, &key, &encoded)
    }

    pub fn get_record<R: Record>(&self, namespace: &Namespace, identity: &str) -> StoreResult<Lookup<R>> {
        store::record_key(namespace, identity)?;
        let mut conn = self.pool.acquire()?;
        store::get_record(&mut conn, namespace, identity)
    }
}

#[tracing::instrument(level = "debug", skip(conn, encoded), fields(bytes = encoded.len()), err)]
fn put_encoded<C: StoreConnection + ?Sized>(conn: &mut C, key: &str, encoded: &[u8]) -> StoreResult<()> {
    client::set(conn, key.as_bytes(), encoded)?;
    Ok(())
}
