//! # Typed Operations
//!
//! Purpose: The four store operations, each a single GET or SET over a
//! caller-supplied connection.
//!
//! ## Outcomes
//!
//! Every call ends in exactly one of: a value, `Lookup::Absent`, or one
//! `StoreError`. Store errors short-circuit before any decoding is tried.

use rkv_client::{self as client, StoreConnection};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::key::Namespace;
use crate::lookup::Lookup;
use crate::record::{decode_record, encode_record, Record};
use crate::scalar::{FromScalar, ToScalar};

/// Writes a scalar under the verbatim `key`.
#[tracing::instrument(level = "debug", skip(conn, value), err)]
pub fn put_scalar<C, V>(conn: &mut C, key: &str, value: &V) -> StoreResult<()>
where
    C: StoreConnection + ?Sized,
    V: ToScalar + ?Sized,
{
    check_key(key)?;
    client::set(conn, key.as_bytes(), &value.to_scalar())?;
    Ok(())
}

/// Reads the scalar under `key` as `V`.
#[tracing::instrument(level = "debug", skip(conn), err)]
pub fn get_scalar<V, C>(conn: &mut C, key: &str) -> StoreResult<Lookup<V>>
where
    V: FromScalar,
    C: StoreConnection + ?Sized,
{
    check_key(key)?;
    let Some(raw) = client::get(conn, key.as_bytes())? else {
        debug!("key absent");
        return Ok(Lookup::Absent);
    };
    V::from_scalar(&raw)
        .map(Lookup::Found)
        .map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encodes `record` and writes it under `namespace` + `identity`.
///
/// Key and encoding problems are reported before the connection is used.
#[tracing::instrument(level = "debug", skip(conn, record), fields(namespace = %namespace), err)]
pub fn put_record<C, R>(conn: &mut C, namespace: &Namespace, identity: &str, record: &R) -> StoreResult<()>
where
    C: StoreConnection + ?Sized,
    R: Record,
{
    let (key, encoded) = prepare_record(namespace, identity, record)?;
    client::set(conn, key.as_bytes(), &encoded)?;
    debug!(%key, bytes = encoded.len(), "record stored");
    Ok(())
}

/// Reads and decodes the record under `namespace` + `identity`.
#[tracing::instrument(level = "debug", skip(conn), fields(namespace = %namespace), err)]
pub fn get_record<R, C>(conn: &mut C, namespace: &Namespace, identity: &str) -> StoreResult<Lookup<R>>
where
    R: Record,
    C: StoreConnection + ?Sized,
{
    let key = record_key(namespace, identity)?;
    let Some(raw) = client::get(conn, key.as_bytes())? else {
        debug!(%key, "record absent");
        return Ok(Lookup::Absent);
    };
    decode_record(&raw)
        .map(Lookup::Found)
        .map_err(|source| StoreError::Decode { key, source })
}

pub(crate) fn check_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            reason: "key is empty",
        });
    }
    Ok(())
}

pub(crate) fn record_key(namespace: &Namespace, identity: &str) -> StoreResult<String> {
    let key = namespace.key(identity);
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            reason: "record key is empty",
        });
    }
    Ok(key)
}

pub(crate) fn prepare_record<R: Record>(
    namespace: &Namespace,
    identity: &str,
    record: &R,
) -> StoreResult<(String, Vec<u8>)> {
    let key = record_key(namespace, identity)?;
    match encode_record(record) {
        Ok(encoded) => Ok((key, encoded)),
        Err(source) => Err(StoreError::Encode { key, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, EncodeError};
    use crate::memory::MemoryConnection;
    use crate::record::{FieldReader, FieldWriter};
    use crate::user::UserProfile;
    use rkv_client::ClientError;

    fn sample_user() -> UserProfile {
        UserProfile {
            username: "coderminer.com".to_string(),
            mobile_id: "12345678941".to_string(),
            email: "kevin@163.com".to_string(),
            first_name: "coderminer.com".to_string(),
            last_name: "coderminer.com".to_string(),
        }
    }

    #[test]
    fn integer_scalar_round_trip() {
        let mut conn = MemoryConnection::default();
        put_scalar(&mut conn, "Release Year", &1984_i64).unwrap();
        assert_eq!(get_scalar::<i64, _>(&mut conn, "Release Year").unwrap(), Lookup::Found(1984));
        assert_eq!(conn.raw("Release Year"), Some(&b"1984"[..]));
    }

    #[test]
    fn string_scalar_round_trip() {
        let mut conn = MemoryConnection::default();
        put_scalar(&mut conn, "Favorite Movie", "Repo Man").unwrap();
        let (movie, found) = get_scalar::<String, _>(&mut conn, "Favorite Movie")
            .unwrap()
            .into_parts();
        assert_eq!((movie.as_str(), found), ("Repo Man", true));
    }

    #[test]
    fn missing_scalar_is_absent() {
        let mut conn = MemoryConnection::default();
        let lookup = get_scalar::<String, _>(&mut conn, "Nonexistent Key").unwrap();
        assert_eq!(lookup.into_parts(), (String::new(), false));
    }

    #[test]
    fn text_read_as_integer_is_decode_error() {
        let mut conn = MemoryConnection::default();
        put_scalar(&mut conn, "Favorite Movie", "Repo Man").unwrap();
        let err = get_scalar::<i64, _>(&mut conn, "Favorite Movie").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Decode { key, source: DecodeError::NotInteger { .. } } if key == "Favorite Movie"
        ));
    }

    #[test]
    fn empty_key_rejected_without_sending() {
        let mut conn = MemoryConnection::default();
        assert!(matches!(put_scalar(&mut conn, "", "v"), Err(StoreError::InvalidKey { .. })));
        assert!(matches!(get_scalar::<String, _>(&mut conn, ""), Err(StoreError::InvalidKey { .. })));
        assert!(matches!(
            get_record::<UserProfile, _>(&mut conn, &Namespace::ROOT, ""),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(matches!(
            put_record(&mut conn, &Namespace::ROOT, "", &sample_user()),
            Err(StoreError::InvalidKey { .. })
        ));
        assert_eq!(conn.commands_sent(), 0);
    }

    #[test]
    fn bare_prefix_is_a_usable_record_key() {
        let mut conn = MemoryConnection::default();
        let user = sample_user();
        put_record(&mut conn, &Namespace::USER, "", &user).unwrap();
        assert!(conn.raw("user:").is_some());

        let fetched = get_record::<UserProfile, _>(&mut conn, &Namespace::USER, "").unwrap();
        assert!(fetched.is_found());
        assert_eq!(fetched, Lookup::Found(user));

        // The same key is reachable as a plain scalar key.
        conn.insert_raw("user:", b"1984");
        let year = get_scalar::<i64, _>(&mut conn, &Namespace::USER.key("")).unwrap();
        assert_eq!(year, Lookup::Found(1984));
    }

    #[test]
    fn record_round_trip_under_namespace() {
        let mut conn = MemoryConnection::default();
        let user = sample_user();
        put_record(&mut conn, &Namespace::USER, user.identity(), &user).unwrap();
        assert!(conn.raw("user:coderminer.com").is_some());

        let fetched = get_record::<UserProfile, _>(&mut conn, &Namespace::USER, "coderminer.com").unwrap();
        assert_eq!(fetched, Lookup::Found(user));
    }

    #[test]
    fn missing_record_is_absent_zero_value() {
        let mut conn = MemoryConnection::default();
        let (user, found) = get_record::<UserProfile, _>(&mut conn, &Namespace::USER, "nobody")
            .unwrap()
            .into_parts();
        assert!(!found);
        assert_eq!(user, UserProfile::default());
    }

    #[test]
    fn corrupted_record_is_decode_error() {
        let mut conn = MemoryConnection::default();
        conn.insert_raw("user:broken", b"{\"Username\":\"broken\"");
        let err = get_record::<UserProfile, _>(&mut conn, &Namespace::USER, "broken").unwrap_err();
        assert!(matches!(err, StoreError::Decode { source: DecodeError::Malformed(_), .. }));

        conn.insert_raw("user:partial", br#"{"Username":"partial"}"#);
        let err = get_record::<UserProfile, _>(&mut conn, &Namespace::USER, "partial").unwrap_err();
        assert!(matches!(err, StoreError::Decode { source: DecodeError::MissingField("MobileID"), .. }));
    }

    #[test]
    fn store_error_skips_decode() {
        let mut conn = MemoryConnection::default();
        conn.insert_raw("user:x", b"not json");
        conn.fail_next(ClientError::Server {
            message: b"WRONGTYPE Operation against a key".to_vec(),
        });
        let err = get_record::<UserProfile, _>(&mut conn, &Namespace::USER, "x").unwrap_err();
        assert!(matches!(err, StoreError::Connection(ClientError::Server { .. })));
    }

    #[test]
    fn unencodable_record_fails_before_sending() {
        struct Broken;

        impl Record for Broken {
            fn encode(&self, fields: &mut FieldWriter) {
                fields.field("id", "1").field("id", "2");
            }

            fn decode(_: &FieldReader) -> Result<Self, DecodeError> {
                Ok(Broken)
            }
        }

        let mut conn = MemoryConnection::default();
        let err = put_record(&mut conn, &Namespace::new("broken:"), "1", &Broken).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Encode { key, source: EncodeError::DuplicateField("id") } if key == "broken:1"
        ));
        assert_eq!(conn.commands_sent(), 0);
    }

    #[test]
    fn connection_failure_propagates_from_put() {
        let mut conn = MemoryConnection::default();
        conn.fail_next(ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        )));
        let err = put_scalar(&mut conn, "Release Year", &1984_i64).unwrap_err();
        assert!(matches!(err, StoreError::Connection(ClientError::Io(_))));
        assert_eq!(conn.raw("Release Year"), None);
    }
}
