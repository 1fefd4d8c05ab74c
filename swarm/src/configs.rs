use machine_learning::NetworkConfig;
use serde::{Deserialize, Serialize};

use crate::{Result, SwarmErr};

/// The key config snapshots are stored under.
pub const SNAPSHOT_KEY: &str = "multi_swarm_config";

/// The coefficients and limits of the particle update law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of the previous velocity kept on each step.
    pub inertia_weight: f64,
    /// Pull towards the particle's own best position.
    pub cognitive_weight: f64,
    /// Pull towards the best position of the particle's swarm.
    pub social_weight: f64,
    /// Pull towards the best position across every swarm.
    pub global_weight: f64,
    /// Absolute bound of every weight.
    pub weight_range: f64,
    /// Multiplies every weight by `1 + rate` after it's clamped.
    pub weight_decay_rate: f64,
    /// Chance of a particle being reset on each iteration.
    pub probability_of_death: f64,
    pub max_iterations: usize,
    /// Particles stop once the global best loss is at or below this value.
    pub target_accuracy: f64,
    /// Weight of the `mean(w²)` penalty added to the loss, `0` disables it.
    pub ridge_regression_weight: f64,
    /// The amount of buckets the dataset is split into, `1` trains on the whole of it.
    pub k_folds: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            inertia_weight: 0.729,
            cognitive_weight: 1.49445,
            social_weight: 1.49445,
            global_weight: 0.3645,
            weight_range: 10.,
            weight_decay_rate: 0.,
            probability_of_death: 0.005,
            max_iterations: 500,
            target_accuracy: 0.0001,
            ridge_regression_weight: 0.,
            k_folds: 1,
        }
    }
}

impl TrainingConfig {
    /// Checks that every coefficient is usable.
    ///
    /// # Returns
    /// `ConfigInvalid` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        let coefficients = [
            ("inertia_weight", self.inertia_weight),
            ("cognitive_weight", self.cognitive_weight),
            ("social_weight", self.social_weight),
            ("global_weight", self.global_weight),
            ("weight_decay_rate", self.weight_decay_rate),
        ];

        if let Some((name, _)) = coefficients.iter().find(|(_, c)| !c.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }

        if !(self.weight_range.is_finite() && self.weight_range > 0.) {
            return Err(invalid(format!(
                "weight_range must be positive and finite, got {}",
                self.weight_range
            )));
        }

        if !(0. ..=1.).contains(&self.probability_of_death) {
            return Err(invalid(format!(
                "probability_of_death must be within [0, 1], got {}",
                self.probability_of_death
            )));
        }

        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be positive".to_string()));
        }

        if self.target_accuracy.is_nan() {
            return Err(invalid("target_accuracy can't be NaN".to_string()));
        }

        if !(self.ridge_regression_weight.is_finite() && self.ridge_regression_weight >= 0.) {
            return Err(invalid(
                "ridge_regression_weight must be non negative".to_string(),
            ));
        }

        if self.k_folds == 0 {
            return Err(invalid("k_folds must be positive".to_string()));
        }

        Ok(())
    }
}

/// How the particle tasks are scheduled during training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Every particle advances one iteration at a time on the calling thread.
    Sequential,
    /// One task per particle on the rayon thread pool.
    #[default]
    Parallel,
}

/// The shape of the multi-swarm and of the networks its particles carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSwarmConfig {
    pub swarm_count: usize,
    pub particle_count: usize,
    pub network: NetworkConfig,
    /// Seeds the root generator, taken from the OS when missing.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub execution: ExecutionMode,
}

impl MultiSwarmConfig {
    /// Creates a new unseeded `MultiSwarmConfig` with parallel execution.
    ///
    /// # Arguments
    /// * `swarm_count` - The amount of swarms.
    /// * `particle_count` - The amount of particles in each swarm.
    /// * `network` - The architecture of every particle's network.
    pub fn new(swarm_count: usize, particle_count: usize, network: NetworkConfig) -> Self {
        Self {
            swarm_count,
            particle_count,
            network,
            seed: None,
            execution: ExecutionMode::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Checks the swarm counts and the network architecture.
    ///
    /// # Returns
    /// `ConfigInvalid` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.swarm_count == 0 {
            return Err(invalid("swarm_count must be positive".to_string()));
        }

        if self.particle_count == 0 {
            return Err(invalid("particle_count must be positive".to_string()));
        }

        self.network.validate()?;
        Ok(())
    }

    /// The total amount of particles across every swarm.
    pub fn total_particles(&self) -> usize {
        self.swarm_count * self.particle_count
    }
}

/// Both configs of a multi-swarm, as handed to a persistent store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub multi_swarm: MultiSwarmConfig,
    pub training: TrainingConfig,
}

impl ConfigSnapshot {
    /// Encodes the snapshot as JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes and validates a snapshot produced by `encode`.
    ///
    /// # Returns
    /// `ConfigInvalid` if the bytes are malformed, name an unknown activation or loss,
    /// or describe invalid configs.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = serde_json::from_slice(bytes)?;
        snapshot.multi_swarm.validate()?;
        snapshot.training.validate()?;
        Ok(snapshot)
    }
}

fn invalid(reason: String) -> SwarmErr {
    SwarmErr::ConfigInvalid(reason)
}
