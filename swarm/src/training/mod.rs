mod multi_swarm;
mod particle;

pub use multi_swarm::{MultiSwarm, TrainingReport};
pub use particle::{Particle, ParticleStats, Step};
