//! 주간 챌린지
//!
//! ISO 주차 단위로 이동 거리와 횟수를 무제한 누적하고, 거리 임계값을 넘긴
//! 보상 티어를 각각 독립적으로 수령할 수 있게 한다. 누적은 이벤트 처리에서
//! 무조건 수행되고, 자격 검사는 수령 연산에서만 이루어진다.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// 주간 보상 티어 수
pub const WEEKLY_TIER_COUNT: usize = 3;

/// 주간 티어 테이블 (거리 임계값 m, 보상 SC, 보상 BP) - 오름차순
const WEEKLY_TIERS: [(f64, i64, i64); WEEKLY_TIER_COUNT] =
    [(10_000.0, 100, 20), (25_000.0, 250, 50), (50_000.0, 600, 120)];

/// 유저별-주차별 챌린지 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeeklyChallengeState {
    /// ISO 주차 키, 예: "2026-W10"
    pub week_key: String,
    /// 누적 이동 거리 (m) - 클램프 없음
    pub distance_m: f64,
    /// 누적 이동 횟수
    pub move_count: u32,
    /// 티어별 수령 여부
    pub claimed: [bool; WEEKLY_TIER_COUNT],
}

/// 주간 티어 수령 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeeklyTierReward {
    pub tier: usize,
    pub reward_sc: i64,
    pub reward_bp: i64,
}

impl WeeklyChallengeState {
    pub fn new(week_key: &str) -> Self {
        Self {
            week_key: week_key.to_string(),
            distance_m: 0.0,
            move_count: 0,
            claimed: [false; WEEKLY_TIER_COUNT],
        }
    }

    /// 이동 이벤트 누적 - 자격 검사 없이 무조건 더한다
    pub fn record_movement(&mut self, distance_m: f64) {
        if distance_m.is_finite() && distance_m > 0.0 {
            self.distance_m += distance_m;
        }
        self.move_count += 1;
    }

    /// 해당 티어의 거리 임계값을 넘겼는지
    pub fn tier_met(&self, tier: usize) -> bool {
        WEEKLY_TIERS.get(tier).map(|(threshold, _, _)| self.distance_m >= *threshold).unwrap_or(false)
    }

    /// 티어 수령 - 임계값 충족 + 미수령일 때만 성공하는 한 방향 전이
    ///
    /// 티어는 순서와 무관하게 독립적으로 수령할 수 있다.
    pub fn claim_tier(&mut self, tier: usize) -> Result<WeeklyTierReward> {
        let (threshold, reward_sc, reward_bp) = WEEKLY_TIERS
            .get(tier)
            .copied()
            .ok_or_else(|| CoreError::NotFound(format!("weekly tier {} does not exist", tier)))?;

        if self.distance_m < threshold {
            return Err(CoreError::InvalidParameter(format!(
                "weekly tier {} not reached: {:.0}m / {:.0}m",
                tier, self.distance_m, threshold
            )));
        }
        if self.claimed[tier] {
            return Err(CoreError::InvalidParameter(format!(
                "weekly tier {} already claimed",
                tier
            )));
        }

        self.claimed[tier] = true;
        Ok(WeeklyTierReward { tier, reward_sc, reward_bp })
    }
}
