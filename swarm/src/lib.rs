pub mod configs;
mod error;
pub mod execution;
pub mod rng;
pub mod storage;
pub mod training;

pub use configs::{ConfigSnapshot, ExecutionMode, MultiSwarmConfig, SNAPSHOT_KEY, TrainingConfig};
pub use error::{Result, SwarmErr};
pub use rng::XorShift128;
pub use storage::{BestKey, Blackboard, Position};
pub use training::{MultiSwarm, Particle, TrainingReport};

/// Builds a multi-swarm whose particles draw from `StdRng` generators.
///
/// # Arguments
/// * `config` - The swarm counts and the architecture of the networks.
/// * `training` - The coefficients of the update law.
///
/// # Returns
/// `ConfigInvalid` if either config can't be used.
pub fn new_multi_swarm(config: MultiSwarmConfig, training: TrainingConfig) -> Result<MultiSwarm> {
    MultiSwarm::new(config, training)
}
