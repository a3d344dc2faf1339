use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 스트라이드 티어 한 단계
///
/// Read-only configuration row from `data/catalog/stride_tiers.yaml`.
/// Thresholds are strictly increasing across the table; multiplier and daily
/// cap improve monotonically with level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrideTier {
    pub level: u8,
    pub name: String,
    /// 이 티어에 필요한 연속 이동 일수
    pub required_streak: u32,
    /// 보상 배수
    pub multiplier: f32,
    /// 단일 보상 계산에 적용되는 일일 상한 SC
    pub daily_cap_sc: i64,
    /// 이 티어 도달 시 지급되는 쉴드 수
    pub shield_award: u8,
}

/// 유저별 스트라이드 진행 상태
///
/// Mutated exactly once per calendar-day evaluation; reset in place on long
/// absence, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrideState {
    /// 현재 연속 이동 일수
    pub streak_days: u32,
    /// 현재 티어 레벨
    pub level: u8,
    /// 보유 쉴드 수
    pub shields: u8,
    /// 역대 최장 연속 일수
    pub longest_streak: u32,
    /// 누적 이동 거리 (미터)
    pub lifetime_distance_m: f64,
    /// 마지막으로 활동한 날짜 (KST) - 신규 유저는 None
    pub last_active: Option<NaiveDate>,
}

impl Default for StrideState {
    fn default() -> Self {
        Self {
            streak_days: 0,
            level: 0,
            shields: 0,
            longest_streak: 0,
            lifetime_distance_m: 0.0,
            last_active: None,
        }
    }
}
