pub mod engine;

pub use engine::{MissionClaim, ProgressEngine, ProgressReport};
