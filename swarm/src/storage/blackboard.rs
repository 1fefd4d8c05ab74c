use std::{
    fmt::{self, Display},
    sync::Arc,
};

use machine_learning::{Dataset, NetworkConfig};
use parking_lot::RwLock;
use rand::Rng;

use super::{Position, TrainingSession};
use crate::{Result, SwarmErr, TrainingConfig};

/// Names one of the best positions held by a `Blackboard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BestKey {
    Global,
    Swarm(usize),
}

impl Display for BestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestKey::Global => f.write_str("global"),
            BestKey::Swarm(id) => write!(f, "swarm_{id}"),
        }
    }
}

/// A consistent view of the bests a particle steers towards.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub config: &'a TrainingConfig,
    pub global: Arc<Position>,
    pub swarm: Arc<Position>,
}

/// Which bests a candidate position replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Publication {
    pub swarm: bool,
    pub global: bool,
}

#[derive(Debug)]
struct Bests {
    global: Arc<Position>,
    swarms: Vec<Arc<Position>>,
}

/// The state shared by every particle of a multi-swarm.
///
/// The configs are fixed at construction. The bests only ever improve: a published
/// `Position` is never modified, a better one replaces it.
#[derive(Debug)]
pub struct Blackboard {
    network: NetworkConfig,
    training: TrainingConfig,
    bests: RwLock<Bests>,
}

impl Blackboard {
    /// Creates a new `Blackboard`.
    ///
    /// # Arguments
    /// * `network` - The architecture every particle carries.
    /// * `training` - The coefficients of the update law.
    /// * `global` - The initial global best.
    /// * `swarms` - The initial best of each swarm, indexed by swarm id.
    pub fn new(
        network: NetworkConfig,
        training: TrainingConfig,
        global: Position,
        swarms: Vec<Position>,
    ) -> Self {
        let bests = Bests {
            global: Arc::new(global),
            swarms: swarms.into_iter().map(Arc::new).collect(),
        };

        Self {
            network,
            training,
            bests: RwLock::new(bests),
        }
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn training(&self) -> &TrainingConfig {
        &self.training
    }

    pub fn swarm_count(&self) -> usize {
        self.bests.read().swarms.len()
    }

    /// Installs a dataset for one training run.
    ///
    /// When `k_folds` is above `1` the rows are shuffled with `rng` and split into the
    /// session's folds, otherwise `rng` is left untouched.
    ///
    /// # Returns
    /// The session particles train on, or `DimensionMismatch` if the dataset's widths
    /// disagree with the network architecture.
    pub fn install<'a, R: Rng + ?Sized>(
        &'a self,
        dataset: &'a Dataset,
        rng: &mut R,
    ) -> Result<TrainingSession<'a>> {
        let widths = [
            ("dataset inputs", dataset.input_width(), self.network.input_count),
            (
                "dataset outputs",
                dataset.output_width(),
                self.network.output_count(),
            ),
        ];

        for (what, got, expected) in widths {
            if got != expected {
                return Err(SwarmErr::DimensionMismatch {
                    what,
                    got,
                    expected,
                });
            }
        }

        let folds = dataset.folds(self.training.k_folds, rng)?;
        Ok(TrainingSession::new(self, dataset, folds))
    }

    /// Returns the current global best.
    pub fn global_best(&self) -> Arc<Position> {
        Arc::clone(&self.bests.read().global)
    }

    /// Returns the position currently published under `key`.
    pub fn best(&self, key: BestKey) -> Option<Arc<Position>> {
        let bests = self.bests.read();
        match key {
            BestKey::Global => Some(Arc::clone(&bests.global)),
            BestKey::Swarm(id) => bests.swarms.get(id).map(Arc::clone),
        }
    }

    /// Reads the training config and the bests relevant to a swarm in one go.
    ///
    /// # Returns
    /// `None` if `swarm_id` isn't a swarm of this blackboard.
    pub fn read_snapshot(&self, swarm_id: usize) -> Option<Snapshot<'_>> {
        let bests = self.bests.read();

        Some(Snapshot {
            config: &self.training,
            global: Arc::clone(&bests.global),
            swarm: Arc::clone(bests.swarms.get(swarm_id)?),
        })
    }

    /// Publishes `candidate` as the best of its swarm, and as the global best, wherever
    /// it is strictly better than the current one.
    ///
    /// # Arguments
    /// * `swarm_id` - The swarm the candidate's particle belongs to.
    /// * `candidate` - A particle's new personal best.
    ///
    /// # Returns
    /// Which bests were replaced, or `None` if `swarm_id` isn't a swarm of this
    /// blackboard.
    pub fn try_publish(&self, swarm_id: usize, candidate: &Position) -> Option<Publication> {
        if !candidate.beats(self.bests.read().swarms.get(swarm_id)?) {
            return Some(Publication::default());
        }

        let candidate = Arc::new(candidate.clone());
        let mut publication = Publication::default();
        let mut guard = self.bests.write();
        let bests = &mut *guard;

        // Another particle may have published in between the two locks.
        let swarm = bests.swarms.get_mut(swarm_id)?;
        if candidate.beats(swarm) {
            if candidate.beats(&bests.global) {
                bests.global = Arc::clone(&candidate);
                publication.global = true;
            }

            *swarm = candidate;
            publication.swarm = true;
        }

        Some(publication)
    }
}
