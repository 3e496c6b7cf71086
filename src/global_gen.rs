//! Default generator and entry point functions.
//!
//! The process-wide generator is a [`MonotonicFactory`](crate::MonotonicFactory) created on the
//! first call to [`ulid()`] and kept until the process exits. Programs that need a different
//! entropy source or a narrower ordering scope should own a factory instead.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{Factory, Ulid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a ULID object.
///
/// This function employs a global generator and guarantees the process-wide monotonic order of
/// ULIDs generated within the same millisecond. On Unix, this function resets the generator when
/// the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Panics
///
/// Panics if the system clock reports a time before the Unix epoch or beyond the 48-bit
/// timestamp range.
///
/// # Examples
///
/// ```rust
/// let ulid = ulid_creator::ulid();
/// println!("{}", ulid); // e.g., "01ARZ3NDEKTSV4RRFFQ69G5FAV"
/// println!("{:?}", ulid.as_bytes()); // as 16-byte big-endian array
///
/// let ulid_string: String = ulid_creator::ulid().to_string();
/// ```
pub fn ulid() -> Ulid {
    lock_global_gen()
        .get_mut()
        .create()
        .expect("ulid: system clock out of the 48-bit timestamp range")
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::{EntropySource, MonotonicFactory};

    /// The random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl EntropySource for GlobalGenRng {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: MonotonicFactory<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("ulid: could not initialize global generator");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: MonotonicFactory::new(GlobalGenRng(ReseedingRng::new(
                    core,
                    1024 * 64,
                    OsRng,
                ))),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`MonotonicFactory`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut MonotonicFactory<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!(
                    old_pid = self.pid,
                    new_pid = std::process::id(),
                    "process ID changed; resetting global generator"
                );
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
