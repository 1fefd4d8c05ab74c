mod ensemble;
mod executor;
mod soloist;

pub use ensemble::EnsembleExec;
pub use executor::Executor;
pub use soloist::SoloistExec;
