// 진행도 집계 엔진이 소비하는 정규화 이벤트
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 도메인 이벤트 디스크립터
///
/// The host normalizes whatever happened (a credited movement, a quest clear,
/// a minigame play) into one of these before handing it to the progress
/// aggregation engine. The reward credit that produced the event is already
/// durably committed by then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    MovementCompleted {
        distance_m: f64,
        walk_distance_m: f64,
        duration_s: u32,
        multi_modal: bool,
    },
    QuestCompleted,
    GamePlayed,
    CourseCompleted,
    AllClearAchieved,
}

/// 업적 재계산의 원본이 되는 집계 스냅샷
///
/// Achievement progress is recomputed from these authoritative tallies on
/// every relevant event instead of trusting the event stream incrementally,
/// so replayed or duplicated events cannot double-credit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProgressSources {
    pub lifetime_distance_m: f64,
    pub longest_streak: u32,
    pub quests_completed: u32,
    pub games_played: u32,
    pub courses_completed: u32,
    pub multi_modal_moves: u32,
    pub all_clears: u32,
}
