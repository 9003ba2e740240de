// Random number generation.
//
// Two flavours: OS-entropy draws for ordinary use and a deterministic
// seedable engine for reproducible tests. Both delegate to the `rand` crate.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Get a random u64 from OS entropy.
pub fn get_random_u64() -> u64 {
    rand::rng().random()
}

/// Fill `limbs.len()` random u64 limbs from OS entropy.
pub fn get_random_limbs(limbs: &mut [u64]) {
    let mut rng = rand::rng();
    for limb in limbs.iter_mut() {
        *limb = rng.random();
    }
}

/// Deterministic RNG for testing, seeded from a u64.
pub struct DebugRng {
    inner: StdRng,
}

impl DebugRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn get_random_u64(&mut self) -> u64 {
        self.inner.random()
    }

    pub fn fill_limbs(&mut self, limbs: &mut [u64]) {
        for limb in limbs.iter_mut() {
            *limb = self.inner.random();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_rng_is_deterministic() {
        let mut rng1 = DebugRng::new(42);
        let mut rng2 = DebugRng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.get_random_u64(), rng2.get_random_u64());
        }
    }

    #[test]
    fn debug_rng_different_seeds_differ() {
        let mut rng1 = DebugRng::new(1);
        let mut rng2 = DebugRng::new(2);
        assert_ne!(rng1.get_random_u64(), rng2.get_random_u64());
    }

    #[test]
    fn os_rng_produces_values() {
        let a = get_random_u64();
        let b = get_random_u64();
        assert_ne!(a, b);
    }

    #[test]
    fn fill_limbs_fills_all() {
        let mut limbs = [0u64; 6];
        get_random_limbs(&mut limbs);
        assert!(limbs.iter().any(|&l| l != 0));
    }
}
