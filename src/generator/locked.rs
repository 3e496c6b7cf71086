use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Factory;
use crate::{Error, Ulid};

/// A thread-safe wrapper that serializes every call to the inner factory with a mutex.
///
/// Each call holds the lock for the whole read-increment-write of the factory state, so a
/// [`MonotonicFactory`](super::MonotonicFactory) shared this way yields a single strictly
/// increasing sequence across all callers.
#[derive(Debug, Default)]
pub struct LockedFactory<F>(Mutex<F>);

impl<F: Factory> LockedFactory<F> {
    /// Wraps `factory`.
    pub const fn new(factory: F) -> Self {
        Self(Mutex::new(factory))
    }

    /// Generates a new ULID object from the current timestamp.
    ///
    /// See [`Factory::create`].
    pub fn create(&self) -> Result<Ulid, Error> {
        self.lock().create()
    }

    /// Generates a new ULID object from the `timestamp` passed.
    ///
    /// See [`Factory::create_at`].
    pub fn create_at(&self, timestamp: u64) -> Result<Ulid, Error> {
        self.lock().create_at(timestamp)
    }

    /// Consumes the wrapper and returns the inner factory.
    pub fn into_inner(self) -> F {
        self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the inner factory.
    ///
    /// A poisoned lock is recovered because factories never leave their state half-updated.
    fn lock(&self) -> MutexGuard<'_, F> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F: Factory> From<F> for LockedFactory<F> {
    fn from(factory: F) -> Self {
        Self::new(factory)
    }
}

#[cfg(test)]
mod tests {
    use super::LockedFactory;
    use crate::{Factory, MonotonicFactory, Ulid};

    /// Generates no duplicates or disorder under multithreading
    #[test]
    fn generates_no_duplicates_or_disorder_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync, thread};

        const N_THREADS: usize = 4;
        const N_CALLS: usize = 10_000;

        let g = sync::Arc::new(LockedFactory::new(MonotonicFactory::with_rand08(
            rand::rngs::OsRng,
        )));
        let mut handles = Vec::new();
        for _ in 0..N_THREADS {
            let g = sync::Arc::clone(&g);
            handles.push(
                thread::Builder::new()
                    .spawn(move || {
                        let mut local = Vec::with_capacity(N_CALLS);
                        for _ in 0..N_CALLS {
                            local.push(g.create().unwrap());
                        }
                        local
                    })
                    .map_err(|err| format!("failed to spawn thread: {:?}", err))?,
            );
        }

        let mut all: Vec<Ulid> = Vec::new();
        for handle in handles {
            let local = handle.join().map_err(|_| "thread panicked")?;
            for i in 1..local.len() {
                assert!(local[i - 1] < local[i]);
            }
            all.extend(local);
        }

        assert_eq!(all.iter().collect::<HashSet<_>>().len(), N_THREADS * N_CALLS);
        all.sort();
        for i in 1..all.len() {
            assert!(all[i - 1] < all[i]);
        }
        Ok(())
    }

    /// Serializes explicit timestamps into one increasing sequence
    #[test]
    fn serializes_explicit_timestamps_into_one_increasing_sequence() {
        use std::{sync, thread};

        let g = sync::Arc::new(LockedFactory::new(MonotonicFactory::new(
            |dest: &mut [u8]| dest.fill(0),
        )));
        thread::scope(|s| {
            for _ in 0..4 {
                let g = sync::Arc::clone(&g);
                s.spawn(move || {
                    for _ in 0..1_000 {
                        g.create_at(0x0123_4567_89ab).unwrap();
                    }
                });
            }
        });

        let mut inner = sync::Arc::into_inner(g).unwrap().into_inner();
        let last = inner.last_ulid().unwrap();
        assert_eq!(last.timestamp(), 0x0123_4567_89ab);
        assert_eq!(last.randomness(), 3_999);
        assert_eq!(inner.create_at(0x0123_4567_89ab).unwrap().randomness(), 4_000);
    }
}
