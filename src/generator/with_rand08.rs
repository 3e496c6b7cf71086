//! Integration with `rand` (v0.8) crate.

use super::{BasicFactory, EntropySource, MonotonicFactory};
use rand::RngCore;

/// An adapter that implements [`EntropySource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> EntropySource for Adapter<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

impl<T: RngCore> MonotonicFactory<Adapter<T>> {
    /// Creates a factory object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid_creator::{Factory, MonotonicFactory};
    ///
    /// let mut g = MonotonicFactory::with_rand08(rand::rngs::OsRng);
    /// println!("{}", g.create_at(0x0123_4567_89ab)?);
    /// # Ok::<(), ulid_creator::Error>(())
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}

impl<T: RngCore> BasicFactory<Adapter<T>> {
    /// Creates a factory object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
