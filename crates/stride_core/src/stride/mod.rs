pub mod machine;
pub mod types;

pub use machine::{StrideMachine, ABSENCE_RESET_DAYS, LEVEL_DROP_PER_DAY, MAX_SHIELDS};
pub use types::{StrideState, StrideTier};
