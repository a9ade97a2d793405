//! # Record Encoding
//!
//! Purpose: Turn flat records into a human-readable field map and back.
//!
//! ## Format
//!
//! A JSON object whose members are the record's field names mapped to string
//! values, e.g. `{"Email":"kevin@163.com","Username":"coderminer.com"}`.
//! Members are written in sorted order; readers do not depend on order and
//! ignore members they do not know.
//!
//! Each record type implements [`Record`] by naming its fields explicitly, so
//! the encoding of a type is visible in one place and checked by the compiler.

use serde_json::{Map, Value};

use crate::error::{DecodeError, EncodeError};

/// A flat structured value with named string fields.
pub trait Record: Sized {
    /// Writes every field of the record.
    fn encode(&self, fields: &mut FieldWriter);

    /// Rebuilds the record. Every field the type needs must be present.
    fn decode(fields: &FieldReader) -> Result<Self, DecodeError>;
}

/// Collects named fields for one record.
#[derive(Debug, Default)]
pub struct FieldWriter {
    fields: Map<String, Value>,
    error: Option<EncodeError>,
}

impl FieldWriter {
    /// Adds a string field. The first invalid field name poisons the writer.
    pub fn field(&mut self, name: &'static str, value: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        if name.is_empty() {
            self.error = Some(EncodeError::EmptyFieldName);
        } else if self
            .fields
            .insert(name.to_string(), Value::String(value.to_string()))
            .is_some()
        {
            self.error = Some(EncodeError::DuplicateField(name));
        }
        self
    }

    fn finish(self) -> Result<Vec<u8>, EncodeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        serde_json::to_vec(&Value::Object(self.fields))
            .map_err(|err| EncodeError::Serialize(err.to_string()))
    }
}

/// Read access to the fields of one stored record.
#[derive(Debug)]
pub struct FieldReader {
    fields: Map<String, Value>,
}

impl FieldReader {
    fn parse(raw: &[u8]) -> Result<Self, DecodeError> {
        match serde_json::from_slice::<Value>(raw) {
            Ok(Value::Object(fields)) => Ok(FieldReader { fields }),
            Ok(_) => Err(DecodeError::NotAnObject),
            Err(err) => Err(DecodeError::Malformed(err.to_string())),
        }
    }

    /// Returns the string field `name`.
    pub fn string(&self, name: &'static str) -> Result<String, DecodeError> {
        match self.fields.get(name) {
            Some(Value::String(value)) => Ok(value.clone()),
            Some(_) => Err(DecodeError::FieldNotString(name)),
            None => Err(DecodeError::MissingField(name)),
        }
    }
}

/// Serializes a record to its stored form.
pub fn encode_record<R: Record>(record: &R) -> Result<Vec<u8>, EncodeError> {
    let mut writer = FieldWriter::default();
    record.encode(&mut writer);
    writer.finish()
}

/// Parses a record from its stored form.
pub fn decode_record<R: Record>(raw: &[u8]) -> Result<R, DecodeError> {
    let reader = FieldReader::parse(raw)?;
    R::decode(&reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        left: String,
        right: String,
    }

    impl Record for Pair {
        fn encode(&self, fields: &mut FieldWriter) {
            fields.field("left", &self.left).field("right", &self.right);
        }

        fn decode(fields: &FieldReader) -> Result<Self, DecodeError> {
            Ok(Pair {
                left: fields.string("left")?,
                right: fields.string("right")?,
            })
        }
    }

    struct Clashing;

    impl Record for Clashing {
        fn encode(&self, fields: &mut FieldWriter) {
            fields.field("a", "1").field("a", "2");
        }

        fn decode(_: &FieldReader) -> Result<Self, DecodeError> {
            Ok(Clashing)
        }
    }

    struct Unnamed;

    impl Record for Unnamed {
        fn encode(&self, fields: &mut FieldWriter) {
            fields.field("", "x");
        }

        fn decode(_: &FieldReader) -> Result<Self, DecodeError> {
            Ok(Unnamed)
        }
    }

    #[test]
    fn encodes_sorted_string_map() {
        let pair = Pair {
            right: "r".to_string(),
            left: "l".to_string(),
        };
        assert_eq!(encode_record(&pair).unwrap(), br#"{"left":"l","right":"r"}"#);
    }

    #[test]
    fn awkward_strings_survive() {
        let pair = Pair {
            left: String::new(),
            right: "quote \" slash \\ newline \n tab \t nul \u{0} emoji \u{1F980}".to_string(),
        };
        let raw = encode_record(&pair).unwrap();
        assert_eq!(decode_record::<Pair>(&raw).unwrap(), pair);
    }

    #[test]
    fn rejects_bad_field_names() {
        assert_eq!(encode_record(&Clashing), Err(EncodeError::DuplicateField("a")));
        assert_eq!(encode_record(&Unnamed), Err(EncodeError::EmptyFieldName));
    }

    #[test]
    fn decode_reports_each_failure() {
        assert!(matches!(decode_record::<Pair>(b"{\"left\":"), Err(DecodeError::Malformed(_))));
        assert_eq!(decode_record::<Pair>(b"[1,2]"), Err(DecodeError::NotAnObject));
        assert_eq!(
            decode_record::<Pair>(br#"{"left":"l"}"#),
            Err(DecodeError::MissingField("right"))
        );
        assert_eq!(
            decode_record::<Pair>(br#"{"left":"l","right":7}"#),
            Err(DecodeError::FieldNotString("right"))
        );
    }

    #[test]
    fn ignores_unknown_members() {
        let pair = decode_record::<Pair>(br#"{"left":"l","right":"r","extra":true}"#).unwrap();
        assert_eq!(pair.left, "l");
    }
}
