pub mod milestones;
pub mod pipeline;
pub mod tables;

pub use milestones::detect_milestones;
pub use pipeline::RewardEngine;
pub use tables::{multi_modal_multiplier, TimeBand};
