use ndarray::{Array1, Array2, ArrayView1, s};
use rand::Rng;

use crate::{arch::activations::ActFn, initialization::UniformInit};

/// A fully connected layer carrying a velocity for each of its parameters.
///
/// Parameters are laid out one row per node, the last entry of each row is the node's
/// bias, so every row holds `inputs + 1` values.
#[derive(Debug, Clone)]
pub struct Dense {
    weights: Array2<f64>,
    velocities: Array2<f64>,
    act_fn: ActFn,
}

impl Dense {
    /// Creates a new `Dense` layer with every weight and velocity set to zero.
    ///
    /// # Arguments
    /// * `inputs` - The width of the previous layer.
    /// * `nodes` - The amount of nodes of this layer.
    /// * `act_fn` - The activation applied to the layer's outputs.
    pub fn new(inputs: usize, nodes: usize, act_fn: ActFn) -> Self {
        let shape = (nodes, inputs + 1);

        Self {
            weights: Array2::zeros(shape),
            velocities: Array2::zeros(shape),
            act_fn,
        }
    }

    /// Returns the amount of parameters of this layer.
    pub fn size(&self) -> usize {
        self.weights.len()
    }

    pub fn inputs(&self) -> usize {
        self.weights.ncols() - 1
    }

    pub fn nodes(&self) -> usize {
        self.weights.nrows()
    }

    pub fn act_fn(&self) -> ActFn {
        self.act_fn
    }

    /// Samples new weights and then new velocities for the whole layer.
    pub fn reset<R: Rng + ?Sized>(&mut self, init: &UniformInit, rng: &mut R) {
        self.weights.iter_mut().for_each(|w| *w = init.weight(rng));
        self.velocities.iter_mut().for_each(|v| *v = init.velocity(rng));
    }

    /// Evaluates the layer over a single row.
    ///
    /// # Arguments
    /// * `x` - The previous layer's activated outputs, without the bias input.
    ///
    /// # Panics
    /// If `x` doesn't have `inputs` entries.
    pub fn forward(&self, x: ArrayView1<f64>) -> Array1<f64> {
        let inputs = self.inputs();
        let w = self.weights.slice(s![.., ..inputs]);
        let b = self.weights.column(inputs);

        let z = w.dot(&x) + &b;
        self.act_fn.activate(z.view())
    }

    /// Iterates over the weights in node order.
    pub fn weights(&self) -> impl Iterator<Item = &f64> {
        self.weights.iter()
    }

    /// Iterates over the velocities in node order.
    pub fn velocities(&self) -> impl Iterator<Item = &f64> {
        self.velocities.iter()
    }

    /// Overwrites the weights with the first `size` values of `src`.
    pub fn set_weights(&mut self, src: &[f64]) {
        self.weights.iter_mut().zip(src).for_each(|(w, s)| *w = *s);
    }

    /// Overwrites the velocities with the first `size` values of `src`.
    pub fn set_velocities(&mut self, src: &[f64]) {
        self.velocities
            .iter_mut()
            .zip(src)
            .for_each(|(v, s)| *v = *s);
    }

    /// Iterates mutably over every `(weight, velocity)` pair in node order.
    pub fn params_mut(&mut self) -> impl Iterator<Item = (&mut f64, &mut f64)> {
        self.weights.iter_mut().zip(self.velocities.iter_mut())
    }
}
