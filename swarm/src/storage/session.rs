use machine_learning::{Dataset, Fold};

use super::Blackboard;

/// The blackboard together with the dataset installed for one training run.
///
/// Particles only ever see the dataset through this borrow, which ends with the run.
#[derive(Debug, Clone)]
pub struct TrainingSession<'a> {
    board: &'a Blackboard,
    dataset: &'a Dataset,
    folds: Vec<Fold>,
}

impl<'a> TrainingSession<'a> {
    pub(super) fn new(board: &'a Blackboard, dataset: &'a Dataset, folds: Vec<Fold>) -> Self {
        Self {
            board,
            dataset,
            folds,
        }
    }

    pub fn board(&self) -> &'a Blackboard {
        self.board
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// The k-fold splits of the dataset, empty when training on the whole of it.
    pub fn folds(&self) -> &[Fold] {
        &self.folds
    }
}
