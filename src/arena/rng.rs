//! Injectable random source for the double-gold roll.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform draws in `[0, 1)`.
///
/// The session owns one boxed source; every call advances the shared stream,
/// so callers must draw exactly once per damage event.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Default source: a seeded `SmallRng`.
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws (cycling), counting how many were taken.
#[cfg(test)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    pub draws: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            draws: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.draws % self.values.len()];
        self.draws += 1;
        v
    }
}

#[cfg(test)]
impl RandomSource for rand_chacha::ChaCha8Rng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
