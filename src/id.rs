#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use fstr::FStr;

use crate::{codec, ParseError, RangeError};

/// The largest timestamp a ULID can hold (2^48 - 1 milliseconds).
pub const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// The largest value of the random field (2^80 - 1).
pub const MAX_RANDOMNESS: u128 = (1 << 80) - 1;

/// Represents a Universally Unique Lexicographically Sortable Identifier.
///
/// The value is stored as a 16-byte big-endian array whose high 48 bits hold the timestamp and
/// whose low 80 bits hold the random field, so the derived ordering of the byte array is the
/// ordering of `(timestamp, randomness)` pairs.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Ulid([u8; 16]);

impl Ulid {
    /// Nil ULID (00000000000000000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max ULID (7ZZZZZZZZZZZZZZZZZZZZZZZZZ)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates a ULID from a 48-bit timestamp and an 80-bit random field.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] if either value is wider than its field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid_creator::Ulid;
    ///
    /// let x = Ulid::from_parts(1469918176385, 0x1234_5678_90ab_cdef_0123)?;
    /// assert_eq!(&x.encode() as &str, "01ARYZ6S4128T5CY4GNF6YY093");
    /// assert!(Ulid::from_parts(1 << 48, 0).is_err());
    /// # Ok::<(), ulid_creator::RangeError>(())
    /// ```
    pub const fn from_parts(timestamp: u64, randomness: u128) -> Result<Self, RangeError> {
        if timestamp > MAX_TIMESTAMP {
            return Err(RangeError::Timestamp(timestamp));
        }
        if randomness > MAX_RANDOMNESS {
            return Err(RangeError::Randomness(randomness));
        }
        Ok(Self((((timestamp as u128) << 80) | randomness).to_be_bytes()))
    }

    /// Assembles a ULID from a pre-validated timestamp and ten random bytes.
    pub(crate) fn from_timestamp_and_random_bytes(timestamp: u64, random: [u8; 10]) -> Self {
        debug_assert!(timestamp <= MAX_TIMESTAMP);
        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&timestamp.to_be_bytes()[2..]);
        bytes[6..].copy_from_slice(&random);
        Self(bytes)
    }

    /// Creates a ULID from its 16-byte big-endian representation.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the 16-byte big-endian representation.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns the 48-bit timestamp in milliseconds since the Unix epoch.
    pub const fn timestamp(&self) -> u64 {
        (u128::from_be_bytes(self.0) >> 80) as u64
    }

    /// Returns the 80-bit random field.
    pub const fn randomness(&self) -> u128 {
        u128::from_be_bytes(self.0) & MAX_RANDOMNESS
    }

    /// Returns the ULID whose random field is one greater within the same timestamp, or `None` if
    /// the random field is already at its maximum.
    pub const fn increment(&self) -> Option<Self> {
        if self.randomness() == MAX_RANDOMNESS {
            None
        } else {
            Some(Self((u128::from_be_bytes(self.0) + 1).to_be_bytes()))
        }
    }

    /// Returns the timestamp as a [`SystemTime`](std::time::SystemTime).
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn system_time(&self) -> std::time::SystemTime {
        std::time::UNIX_EPOCH + std::time::Duration::from_millis(self.timestamp())
    }

    /// Returns the 26-digit canonical Crockford base32 string representation stored in a
    /// stack-allocated string type.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the canonical string
    /// representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid_creator::Ulid;
    ///
    /// let x = "01aryz6s4128t5cy4gnf6yy093".parse::<Ulid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "01ARYZ6S4128T5CY4GNF6YY093");
    /// assert_eq!(format!("{}", y), "01ARYZ6S4128T5CY4GNF6YY093");
    /// # Ok::<(), ulid_creator::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<26> {
        let buffer = codec::encode_base32(&self.0);
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer consists of ASCII digits only
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the 8-4-4-4-12 lowercase hexadecimal GUID representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid_creator::Ulid;
    ///
    /// let x = "01ARYZ6S4128T5CY4GNF6YY093".parse::<Ulid>()?;
    /// assert_eq!(&x.encode_guid() as &str, "01563df3-6481-1234-5678-90abcdef0123");
    /// # Ok::<(), ulid_creator::ParseError>(())
    /// ```
    pub fn encode_guid(&self) -> FStr<36> {
        let buffer = codec::encode_hex(&self.0);
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer consists of ASCII digits and dashes only
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Creates a ULID from the 8-4-4-4-12 hexadecimal GUID representation or from 32 hexadecimal
    /// digits without dashes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the length, a digit, or a dash position is invalid.
    pub fn parse_guid(src: &str) -> Result<Self, ParseError> {
        codec::decode_hex(src).map(Self)
    }
}

impl fmt::Display for Ulid {
    /// Returns the 26-digit canonical Crockford base32 string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Ulid {
    type Err = ParseError;

    /// Creates an object from the 26-digit Crockford base32 string representation.
    ///
    /// Letters are accepted in either case, and `I`, `L`, and `O` are read as `1`, `1`, and `0`.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        codec::decode_base32(src).map(Self)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(src: Ulid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Ulid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Ulid> for u128 {
    fn from(src: Ulid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Ulid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Ulid};

    impl From<Ulid> for String {
        fn from(src: Ulid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Ulid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl TryFrom<&str> for Ulid {
        type Error = ParseError;

        fn try_from(src: &str) -> Result<Self, Self::Error> {
            src.parse()
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Ulid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Ulid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Ulid {
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
        type Value = Ulid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a ULID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Ulid;
        use serde_test::{assert_de_tokens_error, assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000000000000000000000", &[0u8; 16]),
                (
                    "01ARYZ6S4128T5CY4GNF6YY093",
                    &[
                        1, 86, 61, 243, 100, 129, 18, 52, 86, 120, 144, 171, 205, 239, 1, 35,
                    ],
                ),
                (
                    "01FWHE4YDG1K1HHH6W1G60EECF",
                    &[
                        1, 127, 34, 226, 121, 176, 12, 195, 24, 196, 220, 12, 12, 7, 57, 143,
                    ],
                ),
                ("7ZZZZZZZZZZZZZZZZZZZZZZZZZ", &[0xffu8; 16]),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Ulid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Rejects malformed input on deserialization
        #[test]
        fn rejects_malformed_input_on_deserialization() {
            assert_de_tokens_error::<serde_test::Readable<Ulid>>(
                &[Token::Str("80000000000000000000000000")],
                "value exceeds 128 bits",
            );
        }
    }
}
