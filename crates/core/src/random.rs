// Random-number seam for the state store

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the two random draws `apply_break` makes.
///
/// The production implementation wraps a seeded `StdRng`; tests supply a
/// scripted source so outcomes are deterministic.
pub trait RandomSource: Send {
    /// Uniform stress reduction in 1..=100.
    fn stress_reduction(&mut self) -> u8;

    /// Uniform draw in [0, 1), compared against the alert probability.
    fn alert_draw(&mut self) -> f64;
}

/// Default `StdRng`-backed source.
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandomSource {
    fn stress_reduction(&mut self) -> u8 {
        self.rng.random_range(1..=100)
    }

    fn alert_draw(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Scripted source for deterministic tests: pops reductions and draws from
/// fixed queues, falling back to a fixed value when a queue runs dry.
#[cfg(test)]
pub struct ScriptedRandomSource {
    reductions: std::collections::VecDeque<u8>,
    draws: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedRandomSource {
    pub fn new(
        reductions: impl IntoIterator<Item = u8>,
        draws: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            reductions: reductions.into_iter().collect(),
            draws: draws.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandomSource {
    fn stress_reduction(&mut self) -> u8 {
        self.reductions.pop_front().unwrap_or(1)
    }

    fn alert_draw(&mut self) -> f64 {
        // An empty queue means "never raise the alert".
        self.draws.pop_front().unwrap_or(1.0)
    }
}
