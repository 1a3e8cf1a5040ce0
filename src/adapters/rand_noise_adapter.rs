//! Standard-normal noise adapter over the `rand` ecosystem.

use crate::ports::noise_port::NoisePort;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

pub struct RandNoiseAdapter {
    rng: StdRng,
}

impl RandNoiseAdapter {
    /// Production source, seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source for scripted runs and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoisePort for RandNoiseAdapter {
    fn next_standard_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}
