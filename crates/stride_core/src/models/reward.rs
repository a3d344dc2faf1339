// 보상 파이프라인 입출력 모델
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// 외부 시스템(장비/캐릭터)이 계산해 넘겨주는 보정치 묶음
///
/// Percent fields are additive-to-1.0 bonuses: +15 means x1.15. The condition
/// multiplier is supplied directly by the character subsystem and follows the
/// 5-step condition efficiency range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RewardModifiers {
    /// 장비 보너스 %
    #[serde(default)]
    pub equipment_pct: f32,
    /// 탈것 시너지 보너스 %
    #[serde(default)]
    pub synergy_pct: f32,
    /// 클래스 적합 보너스 %
    #[serde(default)]
    pub class_match_pct: f32,
    /// 효율 스탯 보너스 %
    #[serde(default)]
    pub efficiency_pct: f32,
    /// 컨디션 배수 (0.5 ~ 1.5)
    #[serde(default = "default_condition_mult")]
    pub condition_mult: f32,
    /// 행운 스탯 - 보너스 발동 확률 % (0 ~ 100)
    #[serde(default)]
    pub luck_pct: f32,
}

fn default_condition_mult() -> f32 {
    1.0
}

impl Default for RewardModifiers {
    fn default() -> Self {
        Self {
            equipment_pct: 0.0,
            synergy_pct: 0.0,
            class_match_pct: 0.0,
            efficiency_pct: 0.0,
            condition_mult: 1.0,
            luck_pct: 0.0,
        }
    }
}

impl RewardModifiers {
    pub fn validate(&self) -> Result<()> {
        for (name, pct) in [
            ("equipment_pct", self.equipment_pct),
            ("synergy_pct", self.synergy_pct),
            ("class_match_pct", self.class_match_pct),
            ("efficiency_pct", self.efficiency_pct),
        ] {
            if !pct.is_finite() || !(0.0..=300.0).contains(&pct) {
                return Err(CoreError::InvalidParameter(format!(
                    "{} must be in 0..=300, got {}",
                    name, pct
                )));
            }
        }
        if !self.condition_mult.is_finite() || !(0.5..=1.5).contains(&self.condition_mult) {
            return Err(CoreError::InvalidParameter(format!(
                "condition_mult must be in 0.5..=1.5, got {}",
                self.condition_mult
            )));
        }
        if !self.luck_pct.is_finite() || !(0.0..=100.0).contains(&self.luck_pct) {
            return Err(CoreError::InvalidParameter(format!(
                "luck_pct must be in 0..=100, got {}",
                self.luck_pct
            )));
        }
        Ok(())
    }
}

/// 보상 계산 결과 - 모든 중간 배수를 보존한다
///
/// Persisted verbatim by the host for audit and client display. The transport
/// factor is folded into `base_sc` per segment; every other factor appears as
/// its own multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RewardBreakdown {
    pub base_sc: f32,
    pub tier_mult: f32,
    pub time_mult: f32,
    pub weather_mult: f32,
    pub multi_modal_mult: f32,
    pub equipment_mult: f32,
    pub synergy_mult: f32,
    pub efficiency_mult: f32,
    pub class_match_mult: f32,
    pub condition_mult: f32,
    /// 행운 발동 시 추가된 SC (미발동이면 0)
    pub luck_bonus_sc: i64,
    /// 최종 지급 SC
    pub total_sc: i64,
    /// 일일 상한으로 잘렸는지
    pub capped: bool,
}

impl RewardBreakdown {
    /// 모든 배수가 중립(1.0)이고 금액이 0인 결과
    pub fn zero() -> Self {
        Self {
            base_sc: 0.0,
            tier_mult: 1.0,
            time_mult: 1.0,
            weather_mult: 1.0,
            multi_modal_mult: 1.0,
            equipment_mult: 1.0,
            synergy_mult: 1.0,
            efficiency_mult: 1.0,
            class_match_mult: 1.0,
            condition_mult: 1.0,
            luck_bonus_sc: 0,
            total_sc: 0,
            capped: false,
        }
    }
}

/// 단일 이동이 달성한 마일스톤 (라벨, 보너스 SC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MilestoneHit {
    pub label: String,
    pub bonus_sc: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_validation_ranges() {
        assert!(RewardModifiers::default().validate().is_ok());

        let mut m = RewardModifiers::default();
        m.luck_pct = 101.0;
        assert!(m.validate().is_err());

        let mut m = RewardModifiers::default();
        m.condition_mult = 0.4;
        assert!(m.validate().is_err());

        let mut m = RewardModifiers::default();
        m.equipment_pct = f32::NAN;
        assert!(m.validate().is_err());

        let mut m = RewardModifiers::default();
        m.equipment_pct = 15.0;
        m.condition_mult = 1.5;
        m.luck_pct = 100.0;
        assert!(m.validate().is_ok());
    }
}
