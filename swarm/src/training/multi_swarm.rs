use std::sync::Arc;

use log::info;
use machine_learning::{Dataset, MlErr, Network, NetworkSnapshot, initialization::UniformInit};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{Particle, ParticleStats};
use crate::{
    ConfigSnapshot, ExecutionMode, MultiSwarmConfig, Result, SwarmErr, TrainingConfig,
    execution::{EnsembleExec, Executor, SoloistExec},
    storage::{BestKey, Blackboard, Position},
};

/// A summary of one call to `MultiSwarm::train`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    /// The global best loss once every particle stopped.
    pub best_loss: f64,
    /// The amount of loss evaluations made during the run.
    pub evaluations: usize,
    /// The amount of particles that died during the run.
    pub deaths: usize,
}

/// Several swarms of particles training the same architecture, sharing their bests
/// through a blackboard.
///
/// Every particle draws from its own generator of type `R`, seeded from a root
/// generator in construction order. The root generator then shuffles the k-fold splits.
#[derive(Debug)]
pub struct MultiSwarm<R = StdRng> {
    config: MultiSwarmConfig,
    board: Blackboard,
    particles: Vec<Particle<R>>,
    predictor: Option<Network>,
    rng: R,
}

impl MultiSwarm {
    /// Creates a new `MultiSwarm` whose particles draw from `StdRng` generators.
    ///
    /// # Arguments
    /// * `config` - The swarm counts and the architecture of the networks.
    /// * `training` - The coefficients of the update law.
    ///
    /// # Returns
    /// `ConfigInvalid` if either config can't be used.
    pub fn new(config: MultiSwarmConfig, training: TrainingConfig) -> Result<Self> {
        Self::with_rng(config, training)
    }
}

impl<R: Rng + SeedableRng + Send> MultiSwarm<R> {
    /// Creates a new `MultiSwarm` whose particles draw from generators of type `R`.
    ///
    /// # Arguments
    /// * `config` - The swarm counts and the architecture of the networks.
    /// * `training` - The coefficients of the update law.
    ///
    /// # Returns
    /// `ConfigInvalid` if either config can't be used.
    pub fn with_rng(config: MultiSwarmConfig, training: TrainingConfig) -> Result<Self> {
        config.validate()?;
        training.validate()?;

        let init = UniformInit::new(training.weight_range).map_err(MlErr::from)?;
        let mut root = match config.seed {
            Some(seed) => R::seed_from_u64(seed),
            None => R::from_os_rng(),
        };

        let size = config.network.param_count();
        let global = Position::unexplored(init.weights(&mut root, size));

        let mut swarm_bests = Vec::with_capacity(config.swarm_count);
        let mut particles = Vec::with_capacity(config.total_particles());

        for swarm_id in 0..config.swarm_count {
            for _ in 0..config.particle_count {
                let mut rng = R::seed_from_u64(root.random());
                let network = Network::new(&config.network, &init, &mut rng)?;
                let particle = Particle::new(particles.len(), swarm_id, network, init.clone(), rng);
                particles.push(particle);
            }

            swarm_bests.push(Position::unexplored(init.weights(&mut root, size)));
        }

        info!(
            "built {} swarms of {} particles, {size} weights and biases each",
            config.swarm_count, config.particle_count
        );

        let board = Blackboard::new(config.network.clone(), training, global, swarm_bests);

        Ok(Self {
            config,
            board,
            particles,
            predictor: None,
            rng: root,
        })
    }

    /// Trains every particle on `dataset` and picks the final predictor.
    ///
    /// Particles keep their positions and bests between calls, so training again
    /// resumes where the previous run stopped.
    ///
    /// # Returns
    /// A summary of the run, or `DimensionMismatch` if the dataset doesn't fit the
    /// network architecture.
    pub fn train(&mut self, dataset: &Dataset) -> Result<TrainingReport> {
        let session = self.board.install(dataset, &mut self.rng)?;
        let before = self.stats();

        info!(
            "training {} particles on {} rows, {} folds",
            self.particles.len(),
            dataset.len(),
            session.folds().len().max(1)
        );

        match self.config.execution {
            ExecutionMode::Sequential => SoloistExec::new().run(&mut self.particles, &session),
            ExecutionMode::Parallel => EnsembleExec::new().run(&mut self.particles, &session),
        }

        let after = self.stats();
        let report = TrainingReport {
            best_loss: self.best_global().loss,
            evaluations: after.evaluations - before.evaluations,
            deaths: after.deaths - before.deaths,
        };

        self.predictor = self.select_predictor()?;

        info!(
            "training finished: best_loss={} evaluations={} deaths={}",
            report.best_loss, report.evaluations, report.deaths
        );

        Ok(report)
    }

    /// The network of the particle with the lowest personal best, carrying its
    /// personal best weights.
    fn select_predictor(&self) -> Result<Option<Network>> {
        let Some(best) = self
            .particles
            .iter()
            .min_by(|a, b| a.personal_best().loss.total_cmp(&b.personal_best().loss))
        else {
            return Ok(None);
        };

        let mut network = best.network().clone();
        network.set_weights(&best.personal_best().weights_and_biases)?;
        Ok(Some(network))
    }

    fn stats(&self) -> ParticleStats {
        let mut stats = ParticleStats::default();
        for particle in &self.particles {
            stats += particle.stats();
        }
        stats
    }

    fn predictor(&self) -> Result<&Network> {
        self.predictor.as_ref().ok_or(SwarmErr::NoData)
    }

    /// The fraction of rows of `data` the final predictor classifies correctly.
    ///
    /// # Returns
    /// `NoData` if the multi-swarm hasn't been trained yet.
    pub fn classification_accuracy(&self, data: &Dataset) -> Result<f64> {
        Ok(self.predictor()?.classification_accuracy(data)?)
    }

    /// Runs the final predictor over a single row of inputs.
    ///
    /// # Returns
    /// `NoData` if the multi-swarm hasn't been trained yet or `DimensionMismatch` if
    /// `inputs` has the wrong width.
    pub fn predict(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        Ok(self.predictor()?.activate(inputs)?)
    }

    /// A serializable copy of the final predictor.
    ///
    /// # Returns
    /// `NoData` if the multi-swarm hasn't been trained yet.
    pub fn best_network(&self) -> Result<NetworkSnapshot> {
        Ok(self.predictor()?.snapshot())
    }

    /// The global best currently on the blackboard.
    pub fn best_global(&self) -> Arc<Position> {
        self.board.global_best()
    }

    /// The best of swarm `id`, if there is such a swarm.
    pub fn best_swarm(&self, id: usize) -> Option<Arc<Position>> {
        self.board.best(BestKey::Swarm(id))
    }

    pub fn config(&self) -> &MultiSwarmConfig {
        &self.config
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.board
    }

    pub fn particles(&self) -> &[Particle<R>] {
        &self.particles
    }

    /// Both configs, ready to be handed to a persistent store.
    pub fn config_snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            multi_swarm: self.config.clone(),
            training: *self.board.training(),
        }
    }
}
