use rand::Rng;

use crate::{storage::TrainingSession, training::Particle};

/// Schedules the training of a set of particles.
///
/// An `Executor` returns only once every particle has stopped, either because the
/// global best reached the target loss or because it ran out of iterations.
pub trait Executor {
    /// Trains every particle on the installed dataset.
    ///
    /// # Arguments
    /// * `particles` - The particles to train.
    /// * `session` - The blackboard and the dataset of this run.
    fn run<R: Rng + Send>(&self, particles: &mut [Particle<R>], session: &TrainingSession<'_>);
}
