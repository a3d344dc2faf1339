use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 업적 카테고리 - 카테고리별 집계 리더가 progress를 재계산한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    /// 누적 이동 거리
    Distance,
    /// 최장 연속 일수
    Streak,
    /// 퀘스트 완료 수
    Quest,
    /// 미니게임 플레이 수
    Game,
    /// 코스 완주 수
    Course,
    /// 일회성 이벤트 (코드별 전용 집계)
    Special,
}

/// 업적 정의 (`data/catalog/achievements.yaml`의 한 줄)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AchievementDef {
    pub code: String,
    pub category: AchievementCategory,
    pub target: i64,
    pub title: String,
}

/// 유저별-업적별 진행 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AchievementState {
    pub code: String,
    /// target에서 캡된 진행도
    pub progress: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// 보상 수령 여부 - 수령 게이팅 자체는 원장 레이어 소관
    pub claimed: bool,
}

impl AchievementState {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            progress: 0,
            completed: false,
            completed_at: None,
            claimed: false,
        }
    }

    /// 원본 집계에서 재계산된 진행도를 반영한다.
    ///
    /// Monotone: recorded progress never decreases, completion flips exactly
    /// once. Safe to run redundantly under event replay.
    ///
    /// Returns true when this call completed the achievement.
    pub fn apply_recomputed(
        &mut self,
        recomputed: i64,
        target: i64,
        now: DateTime<Utc>,
    ) -> bool {
        let capped = recomputed.min(target);
        if capped > self.progress {
            self.progress = capped;
        }
        if !self.completed && self.progress >= target {
            self.completed = true;
            self.completed_at = Some(now);
            return true;
        }
        false
    }
}
