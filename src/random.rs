//! Secure randomness capability used by the generator.
//!
//! The generator never reaches for a global RNG: callers hand it a
//! [`SecureRandomSource`]. Production code uses [`OsRandom`], which draws
//! straight from the operating system. Any cryptographically secure
//! `rand` generator can be wrapped in [`CryptoRandom`], which is how tests
//! get reproducible output from a seeded `StdRng`.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};

/// Uniform draws from an unpredictable source.
pub trait SecureRandomSource {
    /// Returns an integer uniformly distributed in `0..upper`.
    ///
    /// `upper` must be non-zero.
    fn below(&mut self, upper: usize) -> usize;

    /// Picks one element uniformly, or `None` for an empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }
}

/// Operating system entropy. Stateless, so every call is independent.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl SecureRandomSource for OsRandom {
    fn below(&mut self, upper: usize) -> usize {
        OsRng.gen_range(0..upper)
    }
}

/// Adapter for any `rand` generator that is marked as cryptographically secure.
#[derive(Debug, Clone)]
pub struct CryptoRandom<R>(pub R);

impl<R: RngCore + CryptoRng> SecureRandomSource for CryptoRandom<R> {
    fn below(&mut self, upper: usize) -> usize {
        // rand's uniform sampler rejects out-of-zone values, so there is no modulo bias
        self.0.gen_range(0..upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_os_random_stays_in_range() {
        let mut rng = OsRandom;
        for upper in 1..50 {
            assert!(rng.below(upper) < upper);
        }
    }

    #[test]
    fn test_below_one_is_always_zero() {
        let mut rng = OsRandom;
        for _ in 0..100 {
            assert_eq!(rng.below(1), 0);
        }
    }

    #[test]
    fn test_choose_empty_slice() {
        let mut rng = OsRandom;
        let empty: [char; 0] = [];
        assert_eq!(rng.choose(&empty), None);
    }

    #[test]
    fn test_choose_returns_member() {
        let mut rng = CryptoRandom(StdRng::seed_from_u64(11));
        let items = ['x', 'y', 'z'];
        for _ in 0..100 {
            let picked = rng.choose(&items).expect("non-empty slice");
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = CryptoRandom(StdRng::seed_from_u64(42));
        let mut b = CryptoRandom(StdRng::seed_from_u64(42));
        let draws_a: Vec<usize> = (0..32).map(|_| a.below(1000)).collect();
        let draws_b: Vec<usize> = (0..32).map(|_| b.below(1000)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_every_value_is_reachable() {
        let mut rng = OsRandom;
        let mut seen = [false; 6];
        for _ in 0..2_000 {
            seen[rng.below(6)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
