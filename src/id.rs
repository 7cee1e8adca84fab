use std::{fmt, str};

use fstr::FStr;

use crate::layout;
use crate::ParseError;

/// Represents a 128-bit Globally Unique IDentifier.
///
/// The 16 bytes are held in native (Windows/.NET) order; see [`layout`](crate::layout) for the
/// relation to the compliant order used by the text form. The derived ordering compares native
/// bytes lexicographically, which is the order [`SequentialGenerator`](crate::SequentialGenerator)
/// guarantees.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Guid([u8; 16]);

impl Guid {
    /// Nil GUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max GUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates a GUID from bytes in native order.
    pub const fn from_native_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array in native order.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Turns 16 random bytes into a version 4 GUID.
    pub(crate) const fn from_random_bytes(mut bytes: [u8; 16]) -> Self {
        // native byte 7 holds the version nibble and byte 8 the variant bits
        bytes[7] = 0x40 | (bytes[7] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        Self(bytes)
    }

    /// Returns the version field if the variant field is `10`, or `None` otherwise.
    pub const fn version(&self) -> Option<u8> {
        if self.0[8] >> 6 == 0b10 {
            Some(self.0[7] >> 4)
        } else {
            None
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqguid::Guid;
    ///
    /// let x = "01020304-0506-0708-090a-0b0c0d0e0f10".parse::<Guid>()?;
    /// assert_eq!(x.as_bytes()[..4], [4, 3, 2, 1]);
    /// assert_eq!(&x.encode() as &str, "01020304-0506-0708-090a-0b0c0d0e0f10");
    /// assert_eq!(format!("{}", x.encode()), "01020304-0506-0708-090a-0b0c0d0e0f10");
    /// # Ok::<(), seqguid::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in layout::to_compliant(&self.0).into_iter().enumerate() {
            let e = e as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: ok because buffer consists of ASCII bytes
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

impl fmt::Display for Guid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Guid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation or from 32 bare
    /// hexadecimal digits.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let hyphenated = match src.len() {
            36 => true,
            32 => false,
            _ => return Err(ERR),
        };

        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if hyphenated
                && (i == 3 || i == 5 || i == 7 || i == 9)
                && iter.next().ok_or(ERR)? != '-'
            {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(layout::to_native(&dst)))
        } else {
            Err(ERR)
        }
    }
}

impl From<Guid> for String {
    fn from(src: Guid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Guid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl AsRef<[u8]> for Guid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Guid;

    impl From<Guid> for uuid::Uuid {
        fn from(src: Guid) -> Self {
            uuid::Uuid::from_bytes(src.to_compliant_bytes())
        }
    }

    impl From<uuid::Uuid> for Guid {
        fn from(src: uuid::Uuid) -> Self {
            Self::from_compliant_bytes(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Guid};
    use serde::{de, Deserializer, Serializer};

    /// Serializes the text form to human-readable formats and the compliant byte order to the
    /// others, so that non-.NET peers read the same value.
    impl serde::Serialize for Guid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.to_compliant_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Guid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Guid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a GUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Guid::from_compliant_slice(value).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Guid;
        use serde_test::{assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "01020304-0506-0708-090a-0b0c0d0e0f10",
                    &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
                ),
                (
                    "6f9619ff-8b86-d011-b42d-00c04fc964ff",
                    &[
                        111, 150, 25, 255, 139, 134, 208, 17, 180, 45, 0, 192, 79, 201, 100, 255,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Guid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }
    }
}
