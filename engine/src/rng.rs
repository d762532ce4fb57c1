//! Injected randomness source for the market walks.
//!
//! Every stochastic step in the engine draws from a [`MarketRng`] passed in
//! by the caller. Production drivers seed from OS entropy; tests pin a seed
//! and replay the exact same walk.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable pseudo-random source for price and fee walks.
#[derive(Clone, Debug)]
pub struct MarketRng {
    inner: ChaCha8Rng,
}

impl MarketRng {
    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Deterministic source for replayable runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform draw in `[-0.5, 0.5)`, the step shape shared by every walk.
    pub fn jitter(&mut self) -> f64 {
        self.unit() - 0.5
    }
}
