pub mod arch;
pub mod configs;
pub mod dataset;
pub mod encoding;
mod error;
pub mod initialization;

pub use arch::{Network, NetworkSnapshot, activations::ActFn, loss::LossFn};
pub use configs::{LayerConfig, NetworkConfig};
pub use dataset::{Dataset, Example, Fold};
pub use error::{MlErr, Result};
