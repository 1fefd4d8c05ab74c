use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{maxout, softmax, split_softmax};

const SELU_LAMBDA: f64 = 1.0507;
const SELU_ALPHA: f64 = 1.67326;
const LEAKY_SLOPE: f64 = 0.01;
const TANH_SATURATION: f64 = 20.;

/// The activation applied to the outputs of a layer.
///
/// Most variants act element-wise, `Softmax`, `Maxout` and `SplitSoftmax`
/// act on the whole output row at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFn {
    Identity,
    /// `1` for positive inputs, the input itself otherwise.
    BinaryStep,
    Sigmoid,
    HyperbolicTangent,
    ArcTan,
    Softsign,
    Isru,
    Relu,
    LeakyRelu,
    Elu,
    Selu,
    SoftPlus,
    BentIdentity,
    Sinusoid,
    Sinc,
    Gaussian,
    Softmax,
    Maxout,
    SplitSoftmax,
}

use ActFn::*;

impl ActFn {
    /// Activates a row of node outputs.
    ///
    /// # Arguments
    /// * `x` - The raw outputs of a layer.
    ///
    /// # Returns
    /// A freshly allocated row of the same length.
    pub fn activate(self, x: ArrayView1<f64>) -> Array1<f64> {
        match self {
            Softmax => softmax(x),
            Maxout => maxout(x),
            SplitSoftmax => split_softmax(x),
            _ => x.mapv(|v| self.f(v)),
        }
    }

    /// Applies the activation to a single value.
    ///
    /// Row-wide variants can't be evaluated on a lone value and return it unchanged,
    /// use `activate` for those.
    pub fn f(self, x: f64) -> f64 {
        match self {
            Identity | Softmax | Maxout | SplitSoftmax => x,
            BinaryStep => {
                if x > 0. {
                    1.
                } else {
                    x
                }
            }
            Sigmoid => 1. / (1. + (-x).exp()),
            HyperbolicTangent => {
                if x < -TANH_SATURATION {
                    -1.
                } else if x > TANH_SATURATION {
                    1.
                } else {
                    x.tanh()
                }
            }
            ArcTan => x.atan(),
            Softsign => x / (1. + x.abs()),
            Isru => x / (1. + x * x).sqrt(),
            Relu => x.max(0.),
            LeakyRelu => {
                if x >= 0. {
                    x
                } else {
                    LEAKY_SLOPE * x
                }
            }
            Elu => {
                if x >= 0. {
                    x
                } else {
                    x.exp() - 1.
                }
            }
            Selu => {
                let y = if x >= 0. {
                    SELU_LAMBDA * x
                } else {
                    SELU_LAMBDA * SELU_ALPHA * (x.exp() - 1.)
                };
                saturate(y)
            }
            SoftPlus => saturate(x.exp().ln_1p()),
            BentIdentity => saturate(((x * x + 1.).sqrt() - 1.) / 2. + x),
            Sinusoid => {
                if x.is_infinite() {
                    saturate(x)
                } else {
                    x.sin()
                }
            }
            Sinc => {
                if x == 0. {
                    1.
                } else if x.is_infinite() {
                    f64::MAX
                } else {
                    x.sin() / x
                }
            }
            Gaussian => (-x * x).exp(),
        }
    }
}

/// Maps infinities to the largest finite value of the same sign.
fn saturate(y: f64) -> f64 {
    if y.is_infinite() {
        f64::MAX.copysign(y)
    } else {
        y
    }
}
