use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{activations::ActFn, layers::Dense, loss::LossFn};
use crate::{Dataset, MlErr, NetworkConfig, Result, initialization::UniformInit};

/// A feed-forward network whose flat parameter vector is a point in the search space.
///
/// Every layer also stores a velocity per parameter, so the network can be moved
/// around without any extra bookkeeping.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    layers: Vec<Dense>,
    size: usize,
}

/// A serializable copy of a network's architecture and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub config: NetworkConfig,
    pub weights_and_biases: Vec<f64>,
}

impl Network {
    /// Creates a new `Network` with randomly initialized parameters.
    ///
    /// # Arguments
    /// * `config` - The architecture of the network.
    /// * `init` - The distributions to sample the weights and velocities from.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// `ConfigInvalid` if the architecture can't be built.
    pub fn new<R: Rng + ?Sized>(
        config: &NetworkConfig,
        init: &UniformInit,
        rng: &mut R,
    ) -> Result<Self> {
        let mut network = Self::zeroed(config)?;
        network.reset(init, rng);
        Ok(network)
    }

    /// Rebuilds a network out of a snapshot, velocities start at zero.
    ///
    /// # Returns
    /// `ConfigInvalid` for an invalid architecture or `DimensionMismatch` if the amount of
    /// parameters doesn't match it.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Self> {
        let mut network = Self::zeroed(&snapshot.config)?;
        network.set_weights(&snapshot.weights_and_biases)?;
        Ok(network)
    }

    fn zeroed(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;

        let mut inputs = config.input_count;
        let layers: Vec<_> = config
            .layers
            .iter()
            .map(|layer| {
                let dense = Dense::new(inputs, layer.node_count, layer.activation);
                inputs = layer.node_count;
                dense
            })
            .collect();

        Ok(Self {
            config: config.clone(),
            size: layers.iter().map(|l| l.size()).sum(),
            layers,
        })
    }

    /// Resamples every weight and velocity, layer by layer.
    pub fn reset<R: Rng + ?Sized>(&mut self, init: &UniformInit, rng: &mut R) {
        for layer in &mut self.layers {
            layer.reset(init, rng);
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Returns the total amount of weights and biases.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn input_count(&self) -> usize {
        self.config.input_count
    }

    pub fn output_count(&self) -> usize {
        self.config.output_count()
    }

    pub fn loss_fn(&self) -> LossFn {
        self.config.loss
    }

    /// Runs the forward pass over a single row of inputs.
    ///
    /// # Returns
    /// The activated outputs of the last layer, or `DimensionMismatch` if `inputs`
    /// doesn't have `input_count` entries.
    pub fn activate(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.check_width("network inputs", inputs.len(), self.input_count())?;
        Ok(self.forward(ArrayView1::from(inputs)).to_vec())
    }

    /// Runs the forward pass over every row of `inputs`.
    ///
    /// # Returns
    /// One output row per input row, or `DimensionMismatch` for rows of the wrong width.
    pub fn activate_batch(&self, inputs: ArrayView2<f64>) -> Result<Array2<f64>> {
        self.check_width("network inputs", inputs.ncols(), self.input_count())?;

        let mut outputs = Array2::zeros((inputs.nrows(), self.output_count()));
        for (x, mut y) in inputs.rows().into_iter().zip(outputs.rows_mut()) {
            y.assign(&self.forward(x));
        }

        Ok(outputs)
    }

    fn forward(&self, x: ArrayView1<f64>) -> Array1<f64> {
        let mut layers = self.layers.iter();
        let Some(first) = layers.next() else {
            return x.to_owned();
        };

        layers.fold(first.forward(x), |y, layer| layer.forward(y.view()))
    }

    /// Returns the flat parameter vector in layer order.
    pub fn weights(&self) -> Vec<f64> {
        self.layers.iter().flat_map(|l| l.weights()).copied().collect()
    }

    /// Overwrites the parameters from a flat vector in layer order.
    ///
    /// # Returns
    /// `DimensionMismatch` if `weights` doesn't hold `size` values.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        self.check_width("weights and biases", weights.len(), self.size)?;

        let mut rest = weights;
        for layer in &mut self.layers {
            let (head, tail) = rest.split_at(layer.size());
            layer.set_weights(head);
            rest = tail;
        }

        Ok(())
    }

    /// Returns the flat velocity vector in layer order.
    pub fn velocities(&self) -> Vec<f64> {
        self.layers
            .iter()
            .flat_map(|l| l.velocities())
            .copied()
            .collect()
    }

    /// Overwrites the velocities from a flat vector in layer order.
    ///
    /// # Returns
    /// `DimensionMismatch` if `velocities` doesn't hold `size` values.
    pub fn set_velocities(&mut self, velocities: &[f64]) -> Result<()> {
        self.check_width("velocities", velocities.len(), self.size)?;

        let mut rest = velocities;
        for layer in &mut self.layers {
            let (head, tail) = rest.split_at(layer.size());
            layer.set_velocities(head);
            rest = tail;
        }

        Ok(())
    }

    /// Iterates mutably over every `(weight, velocity)` pair in the flat layer order.
    pub fn params_mut(&mut self) -> impl Iterator<Item = (&mut f64, &mut f64)> {
        self.layers.iter_mut().flat_map(|l| l.params_mut())
    }

    /// The mean of the squared parameters, used as a ridge penalty.
    pub fn mean_squared_weight(&self) -> f64 {
        let sum: f64 = self
            .layers
            .iter()
            .flat_map(|l| l.weights())
            .map(|w| w * w)
            .sum();

        sum / self.size as f64
    }

    /// Checks that the rows of `data` fit this network.
    ///
    /// # Returns
    /// `DimensionMismatch` if the input or output widths disagree with the architecture.
    pub fn check_dataset(&self, data: &Dataset) -> Result<()> {
        self.check_width("dataset inputs", data.input_width(), self.input_count())?;
        self.check_width("dataset outputs", data.output_width(), self.output_count())
    }

    /// Scores the network over a whole dataset with its configured loss.
    ///
    /// # Returns
    /// The loss averaged over the rows of `data`, `+∞` if any output is `NaN`.
    pub fn mean_loss(&self, data: &Dataset) -> Result<f64> {
        self.check_dataset(data)?;
        let actual = self.activate_batch(data.inputs())?;

        if actual.iter().any(|a| a.is_nan()) {
            return Ok(f64::INFINITY);
        }

        self.loss_fn().loss(data.outputs(), actual.view())
    }

    /// The root mean squared error over every output of `data`.
    pub fn rmse(&self, data: &Dataset) -> Result<f64> {
        self.check_dataset(data)?;
        let actual = self.activate_batch(data.inputs())?;

        let squared: f64 = data
            .outputs()
            .iter()
            .zip(actual.iter())
            .map(|(e, a)| (a - e).powi(2))
            .sum();

        Ok((squared / data.outputs().len() as f64).sqrt())
    }

    /// The fraction of rows whose strongest output matches the expected one.
    ///
    /// When the last layer is a `SplitSoftmax` each half of a row is scored on its own:
    /// a half earns `0.5` when its maximum is in the right place, halving for every
    /// position it is off by.
    pub fn classification_accuracy(&self, data: &Dataset) -> Result<f64> {
        self.check_dataset(data)?;
        let actual = self.activate_batch(data.inputs())?;
        let expected = data.outputs();

        let split = self
            .layers
            .last()
            .is_some_and(|l| l.act_fn() == ActFn::SplitSoftmax);
        let mid = self.output_count() / 2;

        let correct: f64 = expected
            .rows()
            .into_iter()
            .zip(actual.rows())
            .map(|(e, a)| {
                if split {
                    let (e_left, e_right) = e.split_at(Axis(0), mid);
                    let (a_left, a_right) = a.split_at(Axis(0), mid);
                    split_correctness(e_left, a_left) + split_correctness(e_right, a_right)
                } else if argmax(e) == argmax(a) {
                    1.
                } else {
                    0.
                }
            })
            .sum();

        Ok(correct / data.len() as f64)
    }

    /// Takes a serializable copy of the architecture and current parameters.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            config: self.config.clone(),
            weights_and_biases: self.weights(),
        }
    }

    fn check_width(&self, what: &'static str, got: usize, expected: usize) -> Result<()> {
        if got != expected {
            return Err(MlErr::DimensionMismatch {
                what,
                got,
                expected,
            });
        }

        Ok(())
    }
}

fn split_correctness(expected: ArrayView1<f64>, actual: ArrayView1<f64>) -> f64 {
    let delta = argmax(expected).abs_diff(argmax(actual));
    0.5 * 0.5f64.powi(delta as i32)
}

/// Index of the first maximal entry.
fn argmax(x: ArrayView1<f64>) -> usize {
    x.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &v)| {
            if v > best { (i, v) } else { (best_i, best) }
        })
        .0
}
