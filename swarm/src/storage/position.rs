use serde::{Deserialize, Serialize};

/// A point in weight space together with the loss observed there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub weights_and_biases: Vec<f64>,
    pub loss: f64,
}

impl Position {
    /// Creates a new `Position`.
    ///
    /// # Arguments
    /// * `weights_and_biases` - The flat parameter vector of a network.
    /// * `loss` - The loss of the network carrying exactly those parameters.
    pub fn new(weights_and_biases: Vec<f64>, loss: f64) -> Self {
        Self {
            weights_and_biases,
            loss,
        }
    }

    /// A position that hasn't been scored yet, any finite loss beats it.
    pub fn unexplored(weights_and_biases: Vec<f64>) -> Self {
        Self::new(weights_and_biases, f64::INFINITY)
    }

    /// Whether this position is strictly better than `other`.
    pub fn beats(&self, other: &Position) -> bool {
        self.loss < other.loss
    }
}
