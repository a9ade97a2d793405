use std::borrow::Cow;
use std::fmt;

/// Key prefix grouping records of one kind, e.g. `user:`.
///
/// The full key is the prefix followed by the record's identity. Uniqueness
/// across namespaces is left to whoever picks the prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(Cow<'static, str>);

impl Namespace {
    /// Namespace for [`UserProfile`](crate::UserProfile) records.
    pub const USER: Namespace = Namespace(Cow::Borrowed("user:"));

    /// Namespace with no prefix; keys are the identity verbatim.
    pub const ROOT: Namespace = Namespace(Cow::Borrowed(""));

    pub fn new(prefix: impl Into<Cow<'static, str>>) -> Self {
        Namespace(prefix.into())
    }

    pub fn prefix(&self) -> &str {
        &self.0
    }

    /// Builds the store key for `identity`.
    pub fn key(&self, identity: &str) -> String {
        let prefix = self.prefix();
        let mut key = String::with_capacity(prefix.len() + identity.len());
        key.push_str(prefix);
        key.push_str(identity);
        key
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
