use std::{
    error::Error,
    fmt::{self, Display},
};

use machine_learning::MlErr;

/// The result type used across the swarm trainer.
pub type Result<T> = std::result::Result<T, SwarmErr>;

/// The swarm trainer's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum SwarmErr {
    ConfigInvalid(String),
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    NoData,
}

impl From<MlErr> for SwarmErr {
    fn from(value: MlErr) -> Self {
        match value {
            MlErr::ConfigInvalid(reason) => Self::ConfigInvalid(reason),
            MlErr::DimensionMismatch {
                what,
                got,
                expected,
            } => Self::DimensionMismatch {
                what,
                got,
                expected,
            },
            MlErr::NoData => Self::NoData,
        }
    }
}

impl From<serde_json::Error> for SwarmErr {
    fn from(value: serde_json::Error) -> Self {
        Self::ConfigInvalid(value.to_string())
    }
}

impl Display for SwarmErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigInvalid(reason) => write!(f, "Invalid configuration: {reason}"),
            Self::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a dimension mismatch in {what}, got {got} and expected {expected}"
            ),
            Self::NoData => write!(f, "There is no data to work with"),
        }
    }
}

impl Error for SwarmErr {}
