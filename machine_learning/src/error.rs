use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::initialization::RandErr;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    ConfigInvalid(String),
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    NoData,
}

impl From<RandErr> for MlErr {
    fn from(value: RandErr) -> Self {
        Self::ConfigInvalid(value.to_string())
    }
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::ConfigInvalid(reason) => format!("Invalid network configuration: {reason}"),
            MlErr::DimensionMismatch {
                what,
                got,
                expected,
            } => format!("There's a dimension mismatch in {what}, got {got} and expected {expected}"),
            MlErr::NoData => "There is no data to work with".to_string(),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}
