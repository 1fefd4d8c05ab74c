use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::{divergence, pointwise};
use crate::{MlErr, Result};

/// The loss used to score a network's outputs against the expected ones.
///
/// Every loss is averaged over the rows of the batch, lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossFn {
    Squared,
    Cross,
    Hinge,
    /// The exponential of the `Squared` loss.
    Exponential,
    HellingerDistance,
    KullbackLeiblerDivergence,
    GeneralizedKullbackLeiblerDivergence,
    ItakuraSaitoDistance,
}

use LossFn::*;

impl LossFn {
    /// Scores a batch of outputs.
    ///
    /// # Arguments
    /// * `expected` - The expected outputs, one row per example.
    /// * `actual` - The outputs produced by a network, aligned with `expected`.
    ///
    /// # Returns
    /// The loss averaged over the rows, `DimensionMismatch` if the batches are not
    /// aligned or `NoData` if they are empty.
    pub fn loss(self, expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> Result<f64> {
        check_aligned(expected, actual)?;

        let rows = expected.nrows() as f64;
        let total = match self {
            Squared => pointwise::squared(expected, actual),
            Cross => divergence::cross(expected, actual),
            Hinge => pointwise::hinge(expected, actual),
            Exponential => return Ok((pointwise::squared(expected, actual) / rows).exp()),
            HellingerDistance => divergence::hellinger(expected, actual),
            KullbackLeiblerDivergence => divergence::kullback_leibler(expected, actual),
            GeneralizedKullbackLeiblerDivergence => {
                divergence::generalized_kullback_leibler(expected, actual)
            }
            ItakuraSaitoDistance => divergence::itakura_saito(expected, actual),
        };

        Ok(total / rows)
    }
}

fn check_aligned(expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> Result<()> {
    if expected.nrows() != actual.nrows() {
        return Err(MlErr::DimensionMismatch {
            what: "loss rows",
            got: actual.nrows(),
            expected: expected.nrows(),
        });
    }

    if expected.ncols() != actual.ncols() {
        return Err(MlErr::DimensionMismatch {
            what: "loss row width",
            got: actual.ncols(),
            expected: expected.ncols(),
        });
    }

    if expected.is_empty() {
        return Err(MlErr::NoData);
    }

    Ok(())
}
