//! ULID factories and related types.

use crate::{Error, RangeError, Ulid, MAX_TIMESTAMP};

mod basic;
pub use basic::BasicFactory;

#[cfg(feature = "std")]
mod locked;
#[cfg(feature = "std")]
pub use locked::LockedFactory;

pub mod with_rand08;


/// A trait that defines the source of random bytes consumed by the ULID factories.
///
/// Implementations are expected to be cryptographically strong. The trait offers no way to report
/// failure; a source that cannot produce bytes should panic.
///
/// Any `FnMut(&mut [u8])` closure is an entropy source, which is handy for deterministic tests:
///
/// ```rust
/// use ulid_creator::{Factory, MonotonicFactory};
///
/// let mut g = MonotonicFactory::new(|dest: &mut [u8]| dest.fill(0));
/// assert_eq!(g.create_at(1)?.randomness(), 0);
/// assert_eq!(g.create_at(1)?.randomness(), 1);
/// # Ok::<(), ulid_creator::Error>(())
/// ```
pub trait EntropySource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

impl<F: FnMut(&mut [u8])> EntropySource for F {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self(dest)
    }
}

/// A trait that defines the common interface of ULID factories.
pub trait Factory {
    /// Generates a new ULID object from the `timestamp` (milliseconds since the Unix epoch)
    /// passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if `timestamp` is not a 48-bit integer.
    fn create_at(&mut self, timestamp: u64) -> Result<Ulid, Error>;

    /// Generates a new ULID object from the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Factory::create_at`].
    ///
    /// # Panics
    ///
    /// Panics if the system clock reports a time before the Unix epoch.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    fn create(&mut self) -> Result<Ulid, Error> {
        self.create_at(now_ms())
    }
}

/// Returns the current Unix time in milliseconds.
#[cfg(feature = "std")]
pub(crate) fn now_ms() -> u64 {
    use std::time;
    time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("clock may have gone backwards")
        .as_millis() as u64
}

/// Fails unless `timestamp` fits in 48 bits.
fn check_timestamp(timestamp: u64) -> Result<(), RangeError> {
    if timestamp > MAX_TIMESTAMP {
        Err(RangeError::Timestamp(timestamp))
    } else {
        Ok(())
    }
}

/// Draws an 80-bit random field from the entropy source.
fn draw_random<R: EntropySource>(rng: &mut R) -> [u8; 10] {
    let mut random = [0u8; 10];
    rng.fill_bytes(&mut random);
    random
}

/// Represents a ULID factory that remembers the last ULID it produced and guarantees the
/// monotonic order of ULIDs generated within the same millisecond.
///
/// When the requested timestamp is greater than the previous one, the random field is drawn
/// afresh. Otherwise, the previous timestamp is reused and the previous random field is
/// incremented by one, so the output keeps increasing even when the system clock moves backwards.
///
/// In the extremely rare case where the 80-bit random field reaches its maximum within a
/// timestamp, this factory increments the timestamp and draws a new random field; therefore, the
/// timestamp may run one millisecond or more ahead of the real-time clock. Only when the timestamp
/// is already at [`MAX_TIMESTAMP`](crate::MAX_TIMESTAMP) does the factory give up and return
/// [`Error::Exhausted`].
///
/// A factory is mutated through `&mut self`. Wrap it in [`LockedFactory`] (or another mutex) to
/// share one monotonic sequence among threads:
///
/// ```rust
/// use std::{sync, thread};
/// use ulid_creator::{LockedFactory, MonotonicFactory};
///
/// let g = sync::Arc::new(LockedFactory::new(MonotonicFactory::with_rand08(rand::rngs::OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.create().unwrap(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct MonotonicFactory<R> {
    last: Option<Ulid>,

    /// The entropy source used by the factory.
    rng: R,
}

impl<R: EntropySource> MonotonicFactory<R> {
    /// Creates a factory instance.
    pub const fn new(rng: R) -> Self {
        Self { last: None, rng }
    }

    /// Returns the last ULID generated by the factory, if any.
    pub const fn last_ulid(&self) -> Option<Ulid> {
        self.last
    }

    /// Computes the ULID that follows `last` for the requested `timestamp` without storing it.
    fn next_after(&mut self, last: Option<Ulid>, timestamp: u64) -> Result<Ulid, Error> {
        let last = match last {
            Some(last) if timestamp <= last.timestamp() => last,
            _ => {
                let random = draw_random(&mut self.rng);
                return Ok(Ulid::from_timestamp_and_random_bytes(timestamp, random));
            }
        };

        if timestamp < last.timestamp() {
            tracing::debug!(
                requested = timestamp,
                last = last.timestamp(),
                "clock moved backwards; reusing last timestamp"
            );
        }

        if let Some(next) = last.increment() {
            return Ok(next);
        }

        // advance timestamp at random field overflow
        if last.timestamp() == MAX_TIMESTAMP {
            tracing::warn!("random field overflowed at the maximum timestamp");
            return Err(Error::Exhausted);
        }
        let advanced = last.timestamp() + 1;
        tracing::warn!(
            timestamp = advanced,
            "random field overflowed; advancing timestamp"
        );
        let random = draw_random(&mut self.rng);
        Ok(Ulid::from_timestamp_and_random_bytes(advanced, random))
    }
}

impl<R: EntropySource> Factory for MonotonicFactory<R> {
    /// Generates a new ULID object from the `timestamp` passed, reusing the last timestamp if the
    /// one provided is not greater.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if `timestamp` is not a 48-bit integer, or [`Error::Exhausted`] if
    /// no greater ULID than the last one exists. The factory state is left untouched on error.
    fn create_at(&mut self, timestamp: u64) -> Result<Ulid, Error> {
        check_timestamp(timestamp)?;
        let next = self.next_after(self.last, timestamp)?;
        debug_assert!(self.last.map_or(true, |last| last < next));
        self.last = Some(next);
        Ok(next)
    }
}

/// Supports operations as an infinite iterator that produces a new ULID object for each call of
/// `next()`.
///
/// The iterator ends only if the factory reports an error, which for a monotonic factory is
/// permanent.
///
/// # Examples
///
/// ```rust
/// use ulid_creator::MonotonicFactory;
///
/// MonotonicFactory::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: EntropySource> Iterator for MonotonicFactory<R> {
    type Item = Ulid;

    fn next(&mut self) -> Option<Self::Item> {
        self.create().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: EntropySource> std::iter::FusedIterator for MonotonicFactory<R> {}
