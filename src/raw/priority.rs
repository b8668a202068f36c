use core::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Process-wide seed sequence shared by every map that is not given an explicit seed.
static SEED_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Draws the next seed from the process-wide sequence (splitmix64).
pub(crate) fn next_seed() -> u64 {
    let mut z = SEED_SEQUENCE.fetch_add(GOLDEN_GAMMA, Ordering::Relaxed).wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Source of treap node priorities.
#[derive(Clone, Debug)]
pub(crate) struct PriorityGen {
    rng: SmallRng,
}

impl PriorityGen {
    /// Seeds from the process-wide sequence.
    pub(crate) fn new() -> Self {
        Self::with_seed(next_seed())
    }

    /// Seeds deterministically, for reproducible tree shapes.
    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws the priority of a new node.
    pub(crate) fn next_priority(&mut self) -> u32 {
        self.rng.random()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn fixed_seed_is_reproducible() {
        let mut a = PriorityGen::with_seed(7);
        let mut b = PriorityGen::with_seed(7);
        let xs: Vec<u32> = (0..16).map(|_| a.next_priority()).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.next_priority()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn shared_sequence_hands_out_distinct_seeds() {
        let seeds: Vec<u64> = (0..64).map(|_| next_seed()).collect();
        for (i, a) in seeds.iter().enumerate() {
            assert!(seeds[i + 1..].iter().all(|b| a != b));
        }
    }
}
