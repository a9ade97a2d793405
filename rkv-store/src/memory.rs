//! In-memory `StoreConnection` for unit tests.

use std::collections::HashMap;

use rkv_client::{ClientError, ClientResult, RespValue, StoreConnection};

#[derive(Default)]
pub(crate) struct MemoryConnection {
    values: HashMap<Vec<u8>, Vec<u8>>,
    pending_error: Option<ClientError>,
    sent: usize,
}

impl MemoryConnection {
    pub(crate) fn insert_raw(&mut self, key: &str, value: &[u8]) {
        self.values.insert(key.as_bytes().to_vec(), value.to_vec());
    }

    pub(crate) fn raw(&self, key: &str) -> Option<&[u8]> {
        self.values.get(key.as_bytes()).map(Vec::as_slice)
    }

    /// Makes the next command fail with `err` without touching the data.
    pub(crate) fn fail_next(&mut self, err: ClientError) {
        self.pending_error = Some(err);
    }

    pub(crate) fn commands_sent(&self) -> usize {
        self.sent
    }
}

impl StoreConnection for MemoryConnection {
    fn exec(&mut self, args: &[&[u8]]) -> ClientResult<RespValue> {
        self.sent += 1;
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }
        match args {
            [b"GET", key] => Ok(RespValue::Bulk(self.values.get(*key).cloned())),
            [b"SET", key, value] => {
                self.values.insert(key.to_vec(), value.to_vec());
                Ok(RespValue::Simple(b"OK".to_vec()))
            }
            _ => Ok(RespValue::Error(b"ERR unknown command".to_vec())),
        }
    }
}
