//! Shared, optionally seeded random source

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe `StdRng`; a fixed seed makes generated datasets reproducible
#[derive(Debug)]
pub struct SharedRng {
    inner: Mutex<StdRng>,
}

impl SharedRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            inner: Mutex::new(rng),
        }
    }

    /// Lock the generator. A panic in another holder leaves the state usable.
    pub fn lock(&self) -> MutexGuard<'_, StdRng> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_sequence() {
        let a = SharedRng::new(Some(42));
        let b = SharedRng::new(Some(42));
        let xs: Vec<u32> = (0..8).map(|_| a.lock().random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.lock().random()).collect();
        assert_eq!(xs, ys);
    }
}
