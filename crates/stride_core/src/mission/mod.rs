pub mod generator;
pub mod types;

pub use generator::{generate_daily_missions, DAILY_MISSION_COUNT};
pub use types::{DailyMissionInstance, MissionStatus, MissionTemplate, MissionType};
