//! # Scalar Codecs
//!
//! Strings are stored as their UTF-8 bytes, integers as decimal text, so
//! values written here read back the same from any other store client.

use std::borrow::Cow;

use crate::error::DecodeError;

/// A value that can be written verbatim as a store value.
pub trait ToScalar {
    fn to_scalar(&self) -> Cow<'_, [u8]>;
}

/// A value that can be parsed back out of raw store bytes.
pub trait FromScalar: Sized {
    fn from_scalar(raw: &[u8]) -> Result<Self, DecodeError>;
}

impl ToScalar for str {
    fn to_scalar(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl ToScalar for String {
    fn to_scalar(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl<T: ToScalar + ?Sized> ToScalar for &T {
    fn to_scalar(&self) -> Cow<'_, [u8]> {
        (**self).to_scalar()
    }
}

impl FromScalar for String {
    fn from_scalar(raw: &[u8]) -> Result<Self, DecodeError> {
        String::from_utf8(raw.to_vec()).map_err(|_| DecodeError::NotUtf8)
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),*) => {$(
        impl ToScalar for $ty {
            fn to_scalar(&self) -> Cow<'_, [u8]> {
                Cow::Owned(self.to_string().into_bytes())
            }
        }

        impl FromScalar for $ty {
            fn from_scalar(raw: &[u8]) -> Result<Self, DecodeError> {
                std::str::from_utf8(raw)
                    .ok()
                    .and_then(|text| text.parse::<$ty>().ok())
                    .ok_or_else(|| DecodeError::NotInteger {
                        raw: String::from_utf8_lossy(raw).into_owned(),
                    })
            }
        }
    )*};
}

integer_scalar!(i32, i64, u64);
