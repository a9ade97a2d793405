use rkv_client::ClientError;
use thiserror::Error;

/// Result type for typed store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by typed store operations.
///
/// A missing key is not represented here; reads report it as
/// [`Lookup::Absent`](crate::Lookup::Absent).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store was unreachable, the connection broke, or the store
    /// rejected the command.
    #[error("store connection failed: {0}")]
    Connection(#[from] ClientError),
    /// The record could not be serialized; nothing was sent.
    #[error("failed to encode value for key {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: EncodeError,
    },
    /// The stored bytes do not decode as the requested type.
    #[error("failed to decode value at key {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: DecodeError,
    },
    /// The key is unusable; nothing was sent.
    #[error("invalid key: {reason}")]
    InvalidKey { reason: &'static str },
}

/// Why a record could not be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("field name is empty")]
    EmptyFieldName,
    #[error("field {0:?} written twice")]
    DuplicateField(&'static str),
    #[error("{0}")]
    Serialize(String),
}

/// Why stored bytes could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("value is not valid UTF-8")]
    NotUtf8,
    #[error("value {raw:?} is not a valid integer")]
    NotInteger { raw: String },
    #[error("malformed record encoding: {0}")]
    Malformed(String),
    #[error("record encoding is not an object")]
    NotAnObject,
    #[error("record field {0:?} is missing")]
    MissingField(&'static str),
    #[error("record field {0:?} is not a string")]
    FieldNotString(&'static str),
}
