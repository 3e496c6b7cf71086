use super::{check_timestamp, draw_random, EntropySource, Factory};
use crate::{Error, Ulid};

/// Represents a ULID factory that fills the random field afresh for every ULID.
///
/// ULIDs generated within the same millisecond are in random order relative to each other. Use
/// [`MonotonicFactory`](super::MonotonicFactory) when the generation order must be preserved.
///
/// # Examples
///
/// ```rust
/// use ulid_creator::{BasicFactory, Factory};
///
/// let mut g = BasicFactory::with_rand08(rand::rngs::OsRng);
/// let x = g.create_at(0x0123_4567_89ab)?;
/// assert_eq!(x.timestamp(), 0x0123_4567_89ab);
/// # Ok::<(), ulid_creator::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct BasicFactory<R> {
    /// The entropy source used by the factory.
    rng: R,
}

impl<R: EntropySource> BasicFactory<R> {
    /// Creates a factory instance.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: EntropySource> Factory for BasicFactory<R> {
    fn create_at(&mut self, timestamp: u64) -> Result<Ulid, Error> {
        check_timestamp(timestamp)?;
        let random = draw_random(&mut self.rng);
        Ok(Ulid::from_timestamp_and_random_bytes(timestamp, random))
    }
}

/// Supports operations as an infinite iterator that produces a new ULID object for each call of
/// `next()`.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: EntropySource> Iterator for BasicFactory<R> {
    type Item = Ulid;

    fn next(&mut self) -> Option<Self::Item> {
        self.create().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
