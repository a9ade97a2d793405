use crate::error::DecodeError;
use crate::record::{FieldReader, FieldWriter, Record};

/// A user's contact profile, keyed by username under [`Namespace::USER`].
///
/// Stored field names are `Username`, `MobileID`, `Email`, `FirstName` and
/// `LastName`.
///
/// [`Namespace::USER`]: crate::Namespace::USER
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub mobile_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserProfile {
    /// Identity used to build the record's key.
    pub fn identity(&self) -> &str {
        &self.username
    }
}

impl Record for UserProfile {
    fn encode(&self, fields: &mut FieldWriter) {
        fields
            .field("Username", &self.username)
            .field("MobileID", &self.mobile_id)
            .field("Email", &self.email)
            .field("FirstName", &self.first_name)
            .field("LastName", &self.last_name);
    }

    fn decode(fields: &FieldReader) -> Result<Self, DecodeError> {
        Ok(UserProfile {
            username: fields.string("Username")?,
            mobile_id: fields.string("MobileID")?,
            email: fields.string("Email")?,
            first_name: fields.string("FirstName")?,
            last_name: fields.string("LastName")?,
        })
    }
}
