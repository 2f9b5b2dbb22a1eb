pub mod gateway;
pub mod stats;
pub mod students;
pub mod validate;

pub use gateway::FileGateway;
pub use stats::{CareerStats, CollectionStats};
pub use students::{StudentStore, UpdateOutcome};
