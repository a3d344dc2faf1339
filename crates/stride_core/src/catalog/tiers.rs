//! 스트라이드 티어 테이블 로드
//!
//! 최초 호출 시 YAML 파싱, 이후 캐시된 데이터 반환.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::stride::types::StrideTier;

// =============================================================================
// Embedded YAML Data
// =============================================================================

/// 티어 테이블 YAML 데이터 (컴파일 타임 임베딩)
pub const STRIDE_TIERS_YAML: &str = include_str!("../../../../data/catalog/stride_tiers.yaml");

#[derive(Debug, Deserialize)]
struct TierFile {
    tiers: Vec<StrideTier>,
}

// =============================================================================
// Static Caching
// =============================================================================

static STRIDE_TABLE: OnceLock<Vec<StrideTier>> = OnceLock::new();

// =============================================================================
// Public API
// =============================================================================

/// 티어 테이블 로드
///
/// # Panics
/// 임베딩된 YAML이 잘못되었거나 임계값이 오름차순이 아니면 panic.
/// 카탈로그는 빌드 산출물이므로 로드 실패는 프로그래밍 오류다.
pub fn stride_table() -> &'static [StrideTier] {
    STRIDE_TABLE.get_or_init(|| {
        let file: TierFile =
            serde_yaml::from_str(STRIDE_TIERS_YAML).expect("embedded stride_tiers.yaml must parse");
        let tiers = file.tiers;
        assert!(!tiers.is_empty(), "stride tier table must not be empty");
        assert_eq!(tiers[0].required_streak, 0, "tier 0 must start at streak 0");
        for pair in tiers.windows(2) {
            assert!(
                pair[0].required_streak < pair[1].required_streak,
                "stride tier thresholds must be strictly increasing"
            );
            assert_eq!(
                pair[0].level + 1,
                pair[1].level,
                "stride tier levels must be contiguous"
            );
        }
        tiers
    })
}

/// 최대 티어 레벨
pub fn max_level() -> u8 {
    stride_table().last().expect("table is non-empty").level
}

/// 레벨에 해당하는 티어 (범위를 벗어나면 최대 티어로 클램프)
pub fn tier_for_level(level: u8) -> &'static StrideTier {
    let table = stride_table();
    table.get(level as usize).unwrap_or_else(|| table.last().expect("table is non-empty"))
}

/// 연속 일수에 해당하는 최고 티어 레벨
///
/// 테이블 상단부터 내려가며 threshold <= streak 인 첫 티어를 반환한다.
pub fn level_for_streak(streak_days: u32) -> u8 {
    stride_table()
        .iter()
        .rev()
        .find(|tier| tier.required_streak <= streak_days)
        .map(|tier| tier.level)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_loads_and_is_strictly_increasing() {
        let table = stride_table();
        assert!(table.len() >= 2);
        for pair in table.windows(2) {
            assert!(pair[0].required_streak < pair[1].required_streak);
            // 배수와 상한은 티어가 오를수록 개선된다
            assert!(pair[0].multiplier <= pair[1].multiplier);
            assert!(pair[0].daily_cap_sc <= pair[1].daily_cap_sc);
        }
    }

    #[test]
    fn test_level_for_streak_boundaries() {
        // streak 0 -> tier 0
        assert_eq!(level_for_streak(0), 0);

        for tier in stride_table() {
            // 정확히 threshold에 도달하면 그 티어 (하위 티어가 아니라)
            assert_eq!(level_for_streak(tier.required_streak), tier.level);
            if tier.required_streak > 0 {
                assert_eq!(level_for_streak(tier.required_streak - 1), tier.level - 1);
            }
        }
    }

    #[test]
    fn test_tier_for_level_clamps() {
        let top = tier_for_level(u8::MAX);
        assert_eq!(top.level, max_level());
    }
}
