pub mod readers;
pub mod types;

pub use readers::{reader_for, recompute_progress};
pub use types::{AchievementCategory, AchievementDef, AchievementState};
