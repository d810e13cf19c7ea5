//! Seeded, integer-only RNG for the ballot testing simulator.
//!
//! The simulator is the only consumer of randomness in the workspace, and it
//! must be reproducible: the same `u64` seed yields the same stream on every
//! platform. ChaCha20 is seeded explicitly with `seed.to_le_bytes()` in the
//! first 8 bytes of the 32-byte key (remaining bytes zero).

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct SimRng {
    rng: ChaCha20Rng,
    words_consumed: u128,
}

impl SimRng {
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
            words_consumed: 0,
        }
    }

    /// Number of 64-bit words drawn so far (rejected draws included).
    #[inline]
    pub fn words_consumed(&self) -> u128 {
        self.words_consumed
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.words_consumed = self.words_consumed.saturating_add(1);
        self.rng.next_u64()
    }

    /// Unbiased integer in `[0, n)` by rejection sampling; `None` if `n == 0`.
    ///
    /// `threshold = 2^64 mod n`; accept `x >= threshold`, then `x % n` is uniform.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// Integer in the closed range `[lo, hi]`; returns `lo` when `hi <= lo`.
    #[inline]
    pub fn gen_inclusive(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        lo + self.gen_range(hi - lo + 1).unwrap_or(0)
    }
}

impl Default for SimRng {
    fn default() -> Self {
        SimRng::from_seed_u64(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_draws_nothing() {
        let mut rng = SimRng::from_seed_u64(0xDEADBEEFCAFEBABE);
        assert_eq!(rng.gen_range(0), None);
        assert_eq!(rng.words_consumed(), 0);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::from_seed_u64(123456789);
        let mut b = SimRng::from_seed_u64(123456789);
        let seq_a: Vec<u64> = (0..16).map(|_| a.gen_range(10).unwrap()).collect();
        let seq_b: Vec<u64> = (0..16).map(|_| b.gen_range(10).unwrap()).collect();
        assert_eq!(seq_a, seq_b);
        assert!(a.words_consumed() >= 16);
    }

    #[test]
    fn inclusive_range_stays_in_bounds() {
        let mut rng = SimRng::from_seed_u64(7);
        for _ in 0..100 {
            let v = rng.gen_inclusive(2, 3);
            assert!((2..=3).contains(&v));
        }
        assert_eq!(rng.gen_inclusive(5, 5), 5);
        assert_eq!(rng.gen_inclusive(9, 1), 9);
    }
}
