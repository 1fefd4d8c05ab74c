use rand::Rng;

use crate::{
    execution::executor::Executor,
    storage::TrainingSession,
    training::{Particle, Step},
};

/// An executor that trains every particle on the calling thread.
///
/// Particles take turns, one iteration each, so they still steer one another like
/// they do when running concurrently, while a seeded run is fully reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoloistExec;

impl SoloistExec {
    /// Creates a new `SoloistExec`.
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SoloistExec {
    fn run<R: Rng + Send>(&self, particles: &mut [Particle<R>], session: &TrainingSession<'_>) {
        let max_iterations = session.board().training().max_iterations;
        let mut active: Vec<_> = particles.iter_mut().collect();

        for _ in 0..max_iterations {
            active.retain_mut(|particle| particle.step(session) == Step::Continue);

            if active.is_empty() {
                break;
            }
        }
    }
}
