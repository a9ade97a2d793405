/// Outcome of a read: the decoded value, or the key holds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup<T> {
    /// The key exists and its value decoded.
    Found(T),
    /// The store has no value under the key.
    Absent,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }

    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            Lookup::Absent => Lookup::Absent,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::Absent => Lookup::Absent,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent => None,
        }
    }
}

impl<T: Default> Lookup<T> {
    /// Splits into `(value, found)`, substituting the zero value when absent.
    pub fn into_parts(self) -> (T, bool) {
        match self {
            Lookup::Found(value) => (value, true),
            Lookup::Absent => (T::default(), false),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::Absent,
        }
    }
}

impl<T> From<Lookup<T>> for Option<T> {
    fn from(lookup: Lookup<T>) -> Self {
        lookup.into_option()
    }
}
