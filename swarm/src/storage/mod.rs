mod blackboard;
mod position;
mod session;

pub use blackboard::{BestKey, Blackboard, Publication, Snapshot};
pub use position::Position;
pub use session::TrainingSession;
