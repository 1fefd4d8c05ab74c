use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::Result;

/// The ratio between the velocity range and the weight range.
pub const VELOCITY_SCALE: f64 = 0.1;

/// Samples parameters and velocities from symmetric uniform distributions.
///
/// Weights are drawn from `[-range, range)` and velocities from a range
/// `VELOCITY_SCALE` times narrower.
#[derive(Debug, Clone)]
pub struct UniformInit {
    weights: Uniform<f64>,
    velocities: Uniform<f64>,
}

impl UniformInit {
    /// Creates a new `UniformInit`.
    ///
    /// # Arguments
    /// * `weight_range` - The absolute bound of every sampled weight.
    ///
    /// # Returns
    /// An error if the range is not finite or not strictly positive.
    pub fn new(weight_range: f64) -> Result<Self> {
        let velocity_range = weight_range * VELOCITY_SCALE;

        Ok(Self {
            weights: Uniform::new(-weight_range, weight_range)?,
            velocities: Uniform::new(-velocity_range, velocity_range)?,
        })
    }

    /// Samples a single weight.
    pub fn weight<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.weights.sample(rng)
    }

    /// Samples a single velocity.
    pub fn velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.velocities.sample(rng)
    }

    /// Samples a fresh weight vector of length `n`.
    pub fn weights<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.weight(rng)).collect()
    }
}
