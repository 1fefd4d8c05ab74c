mod error;
mod uniform;

pub use error::{RandErr, Result};
pub use uniform::UniformInit;
