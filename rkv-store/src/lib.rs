//! # RecordKV Typed Store
//!
//! Purpose: Store and fetch scalars and structured records in a remote
//! key-value store with one set of rules for serialization, key naming, and
//! the "key absent" outcome.
//!
//! ## Design Principles
//! 1. **Absent Is Not An Error**: Reads return `Lookup::Absent`, never an error.
//! 2. **Explicit Codecs**: Each record type lists its fields by hand; no
//!    reflection, field names and types are fixed at compile time.
//! 3. **Validate Before Sending**: Key and encoding problems surface before
//!    any command reaches the store.
//! 4. **Connection Agnostic**: Operations run over any `StoreConnection`.
//!
//! ## Usage
//!
//! ```no_run
//! use rkv_client::ClientConfig;
//! use rkv_store::{Lookup, Namespace, TypedStore};
//!
//! # fn main() -> Result<(), rkv_store::StoreError> {
//! let store = TypedStore::connect(ClientConfig::default())?;
//! store.put_scalar("Release Year", &1984_i64)?;
//! if let Lookup::Found(year) = store.get_scalar::<i64>("Release Year")? {
//!     println!("Release Year = {year}");
//! }
//! # let _ = Namespace::USER;
//! # Ok(())
//! # }
//! ```

mod error;
mod key;
mod lookup;
mod record;
mod scalar;
mod store;
mod typed;
mod user;

#[cfg(test)]
mod memory;

pub use error::{DecodeError, EncodeError, StoreError, StoreResult};
pub use key::Namespace;
pub use lookup::Lookup;
pub use record::{decode_record, encode_record, FieldReader, FieldWriter, Record};
pub use scalar::{FromScalar, ToScalar};
pub use store::{get_record, get_scalar, put_record, put_scalar};
pub use typed::TypedStore;
pub use user::UserProfile;
