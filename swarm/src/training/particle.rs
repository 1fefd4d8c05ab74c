use std::ops::AddAssign;

use log::{debug, trace, warn};
use machine_learning::{Dataset, Network, initialization::UniformInit};
use rand::Rng;

use crate::{
    TrainingConfig,
    storage::{Position, Snapshot, TrainingSession},
};

/// What a particle does after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stop,
}

/// Counters accumulated by a particle over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleStats {
    pub iterations: usize,
    pub evaluations: usize,
    pub deaths: usize,
}

impl AddAssign for ParticleStats {
    fn add_assign(&mut self, rhs: Self) {
        self.iterations += rhs.iterations;
        self.evaluations += rhs.evaluations;
        self.deaths += rhs.deaths;
    }
}

/// A network moving through weight space.
///
/// Each particle owns its generator, so its trajectory only depends on its seed and on
/// the bests it reads from the blackboard.
#[derive(Debug)]
pub struct Particle<R> {
    id: usize,
    swarm_id: usize,
    network: Network,
    personal_best: Position,
    init: UniformInit,
    rng: R,
    stats: ParticleStats,
}

impl<R: Rng> Particle<R> {
    /// Creates a new `Particle` whose personal best is its starting position, unscored.
    ///
    /// # Arguments
    /// * `id` - The particle's index across every swarm.
    /// * `swarm_id` - The swarm this particle belongs to.
    /// * `network` - The particle's network, already initialized.
    /// * `init` - The distributions used whenever the particle dies.
    /// * `rng` - The particle's own random number generator.
    pub fn new(id: usize, swarm_id: usize, network: Network, init: UniformInit, rng: R) -> Self {
        Self {
            id,
            swarm_id,
            personal_best: Position::unexplored(network.weights()),
            network,
            init,
            rng,
            stats: ParticleStats::default(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn swarm_id(&self) -> usize {
        self.swarm_id
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn personal_best(&self) -> &Position {
        &self.personal_best
    }

    pub fn stats(&self) -> ParticleStats {
        self.stats
    }

    /// Runs iterations until the global best reaches the target or the iteration cap.
    pub fn train(&mut self, session: &TrainingSession<'_>) {
        let max_iterations = session.board().training().max_iterations;

        for _ in 0..max_iterations {
            if self.step(session) == Step::Stop {
                break;
            }
        }
    }

    /// Runs a single iteration of the update law.
    ///
    /// With k-fold training the particle moves once per fold and its loss is the mean
    /// of the training losses of every fold.
    ///
    /// # Returns
    /// `Step::Stop` if the global best had already reached the target loss, in which case
    /// the particle is left untouched.
    pub fn step(&mut self, session: &TrainingSession<'_>) -> Step {
        let Some(Snapshot {
            config,
            global,
            swarm,
        }) = session.board().read_snapshot(self.swarm_id)
        else {
            warn!(particle = self.id, swarm = self.swarm_id; "unknown swarm, stopping");
            return Step::Stop;
        };

        if global.loss <= config.target_accuracy {
            trace!(particle = self.id; "target reached, stopping");
            return Step::Stop;
        }

        self.stats.iterations += 1;

        let folds = session.folds();
        let loss = if folds.is_empty() {
            self.advance(config, &swarm, &global);
            self.fitness(session.dataset(), config)
        } else {
            let total: f64 = folds
                .iter()
                .map(|fold| {
                    self.advance(config, &swarm, &global);
                    self.fitness(&fold.train, config)
                })
                .sum();

            total / folds.len() as f64
        };
        self.record(session, loss);

        if self.rng.random::<f64>() < config.probability_of_death {
            self.die();

            let loss = if folds.is_empty() {
                self.fitness(session.dataset(), config)
            } else {
                let fold = &folds[self.rng.random_range(0..folds.len())];
                self.fitness(&fold.test, config)
            };
            self.record(session, loss);
        }

        Step::Continue
    }

    /// Updates every velocity and then moves the weights along it.
    fn advance(&mut self, config: &TrainingConfig, swarm: &Position, global: &Position) {
        let range = config.weight_range;
        let decay = 1. + config.weight_decay_rate;
        let rng = &mut self.rng;

        let bests = self
            .personal_best
            .weights_and_biases
            .iter()
            .zip(&swarm.weights_and_biases)
            .zip(&global.weights_and_biases);

        for ((x, v), ((p, s), g)) in self.network.params_mut().zip(bests) {
            let (r1, r2, r3): (f64, f64, f64) = (rng.random(), rng.random(), rng.random());

            *v = config.inertia_weight * *v
                + config.cognitive_weight * r1 * (p - *x)
                + config.social_weight * r2 * (s - *x)
                + config.global_weight * r3 * (g - *x);

            *x = (*x + *v).clamp(-range, range) * decay;
        }
    }

    /// Keeps the current position as the personal best if `loss` improves on it and
    /// publishes it.
    fn record(&mut self, session: &TrainingSession<'_>, loss: f64) {
        if loss >= self.personal_best.loss || loss.is_nan() {
            return;
        }

        self.personal_best = Position::new(self.network.weights(), loss);
        let publication = session
            .board()
            .try_publish(self.swarm_id, &self.personal_best)
            .unwrap_or_default();

        if publication.global {
            let rmse = self.network.rmse(session.dataset()).unwrap_or(f64::NAN);
            debug!(swarm = self.swarm_id, particle = self.id, loss = loss, rmse = rmse; "new global best");
        } else if publication.swarm {
            debug!(swarm = self.swarm_id, particle = self.id, loss = loss; "new swarm best");
        }
    }

    fn fitness(&mut self, dataset: &Dataset, config: &TrainingConfig) -> f64 {
        self.stats.evaluations += 1;

        let loss = match self.network.mean_loss(dataset) {
            Ok(loss) => loss,
            Err(e) => {
                warn!(particle = self.id; "couldn't score the network: {e}");
                return f64::INFINITY;
            }
        };

        if config.ridge_regression_weight > 0. {
            loss + config.ridge_regression_weight * self.network.mean_squared_weight()
        } else {
            loss
        }
    }

    /// Resamples every weight and velocity, the personal best is kept.
    fn die(&mut self) {
        self.network.reset(&self.init, &mut self.rng);
        self.stats.deaths += 1;
        debug!(swarm = self.swarm_id, particle = self.id; "particle died");
    }
}
