//! A Rust implementation of ULID (Universally Unique Lexicographically Sortable Identifier)
//!
//! ```rust
//! let ulid = ulid_creator::ulid();
//! println!("{}", ulid); // e.g., "01ARZ3NDEKTSV4RRFFQ69G5FAV"
//! println!("{}", ulid.encode_guid()); // e.g., "01563e3a-b5d3-d676-4c61-efb99302bd5b"
//! println!("{:?}", ulid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! See [ULID Specification](https://github.com/ulid/spec).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          timestamp                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          timestamp            |          randomness           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          randomness                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          randomness                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `timestamp` field is dedicated to the Unix timestamp in milliseconds.
//! - The 80-bit `randomness` field is filled with a cryptographically strong random number, or,
//!   for ULIDs generated by [`MonotonicFactory`] within the same millisecond, with the previous
//!   random field incremented by one.
//!
//! The canonical text form is 26 Crockford base32 digits in uppercase. The first digit carries
//! only the top three bits, so it is always between `0` and `7`. Parsing accepts lowercase
//! letters and reads `I` and `L` as `1` and `O` as `0`. Text, bytes, and the numeric value all
//! sort in the same order.
//!
//! In the extremely rare circumstances where the 80-bit random field reaches the maximum value and
//! can no more be incremented within the same timestamp, [`MonotonicFactory`] increments the
//! `timestamp`; therefore, the `timestamp` may have a larger value than that of the real-time
//! clock. The factory goes on with such larger values caused by overflows and system clock
//! rollbacks, never emitting a ULID smaller than the previous one.
//!
//! # Other features
//!
//! ULIDs can also be rendered in and parsed from the 8-4-4-4-12 hexadecimal GUID form:
//!
//! ```rust
//! use ulid_creator::Ulid;
//!
//! let x = Ulid::parse_guid("01563df3-6481-1234-5678-90abcdef0123")?;
//! assert_eq!(x.to_string(), "01ARYZ6S4128T5CY4GNF6YY093");
//! # Ok::<(), ulid_creator::ParseError>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` integrates the library with, among others, the system clock to draw current
//!   timestamps. Without `std`, this crate provides limited functionality available under
//!   `no_std` environments.
//! - `global_gen` (implies `std`) enables the primary [`ulid()`] function and the process-wide
//!   global generator under the hood.
//!
//! Optional features:
//!
//! - `serde` enables the serialization and deserialization of [`Ulid`] objects.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;

mod error;
pub use error::{Error, ParseError, RangeError};

mod id;
pub use id::{Ulid, MAX_RANDOMNESS, MAX_TIMESTAMP};

pub mod generator;
#[doc(inline)]
pub use generator::{BasicFactory, EntropySource, Factory, MonotonicFactory};
#[cfg(feature = "std")]
#[doc(inline)]
pub use generator::LockedFactory;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::ulid;
