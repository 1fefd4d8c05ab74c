use rand::Rng;
use rayon::prelude::*;

use crate::{execution::executor::Executor, storage::TrainingSession, training::Particle};

/// An executor that trains every particle as its own task on the rayon thread pool.
///
/// Particles only meet through the blackboard, so the order in which their
/// publications land differs from run to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnsembleExec;

impl EnsembleExec {
    /// Creates a new `EnsembleExec`.
    pub fn new() -> Self {
        Self
    }
}

impl Executor for EnsembleExec {
    fn run<R: Rng + Send>(&self, particles: &mut [Particle<R>], session: &TrainingSession<'_>) {
        particles
            .par_iter_mut()
            .for_each(|particle| particle.train(session));
    }
}
