// 보상 배수 파이프라인
//
// 완료된 이동 한 건을 최종 SC 지급액으로 변환한다. 순수 계산이며 호출자가
// 검증된 입력과 시드된 RNG를 주입한다.
use rand::Rng;

use crate::catalog::tier_for_level;
use crate::clock;
use crate::models::movement::MovementRecord;
use crate::models::reward::{RewardBreakdown, RewardModifiers};
use crate::reward::tables::{multi_modal_multiplier, TimeBand};

/// 보상 계산 엔진
pub struct RewardEngine;

impl RewardEngine {
    /// 이동 한 건의 보상 내역 계산
    ///
    /// 합성 순서: 기본액(이동수단 반영) × 티어 × 시간대 × 날씨 × 멀티모달 ×
    /// 장비 × 시너지 × 효율 × 클래스 × 컨디션 → 내림 → 행운 보너스 → 일일 상한.
    /// 중간값은 내림하지 않고 최종 곱만 내림한다.
    ///
    /// 행운은 보상 계산당 한 번의 독립 시행이다 (세그먼트당이 아니라).
    /// 상한은 행운 보너스까지 더한 단일 계산 결과에 적용되며, 하루 누적
    /// 지급액 관리는 이 레이어 밖(원장)의 정책이다.
    pub fn compute_reward(
        movement: &MovementRecord,
        stride_level: u8,
        modifiers: &RewardModifiers,
        rng: &mut impl Rng,
    ) -> crate::error::Result<RewardBreakdown> {
        movement.validate()?;
        modifiers.validate()?;

        // 1. 기본액: 세그먼트별 100m 단위 × 기본 단가 × 이동수단 배수의 합
        let base_sc: f32 = movement
            .segments
            .iter()
            .map(|segment| {
                let units = (segment.distance_m / 100.0).floor() as f32;
                units * segment.mode.base_rate() * segment.mode.reward_multiplier()
            })
            .sum();

        // 2. 티어 배수 - 티어 전이는 스트라이드 상태 기계 소관, 여기서는 조회만
        let tier = tier_for_level(stride_level);
        let tier_mult = tier.multiplier;

        // 3. 시간대 배수 (KST 기준)
        let hour = clock::service_hour(movement.started_at);
        let time_mult = TimeBand::for_hour(hour).reward_multiplier();

        // 4. 날씨 배수 - 첫 세그먼트가 사람이 움직이는 이동일 때만
        let weather_sensitive =
            movement.primary_mode().map(|m| m.is_weather_sensitive()).unwrap_or(false);
        let weather_mult =
            if weather_sensitive { movement.weather.reward_multiplier() } else { 1.0 };

        // 5. 멀티모달 배수 - 클래스 수 기준
        let multi_modal_mult = multi_modal_multiplier(movement.distinct_class_count());

        // 6. 퍼센트 보정치들
        let equipment_mult = 1.0 + modifiers.equipment_pct / 100.0;
        let synergy_mult = 1.0 + modifiers.synergy_pct / 100.0;
        let efficiency_mult = 1.0 + modifiers.efficiency_pct / 100.0;
        let class_match_mult = 1.0 + modifiers.class_match_pct / 100.0;
        let condition_mult = modifiers.condition_mult;

        // 7. 전체 곱 후 최종에서만 내림
        let product = base_sc
            * tier_mult
            * time_mult
            * weather_mult
            * multi_modal_mult
            * equipment_mult
            * synergy_mult
            * efficiency_mult
            * class_match_mult
            * condition_mult;
        let mut total_sc = product.floor() as i64;

        // 8. 행운 보너스 - 단일 베르누이 시행
        let mut luck_bonus_sc = 0;
        if rng.gen::<f32>() * 100.0 < modifiers.luck_pct {
            luck_bonus_sc = (base_sc * 0.5).floor() as i64;
            total_sc += luck_bonus_sc;
        }

        // 9. 티어 일일 상한
        let mut capped = false;
        if total_sc > tier.daily_cap_sc {
            total_sc = tier.daily_cap_sc;
            capped = true;
        }

        Ok(RewardBreakdown {
            base_sc,
            tier_mult,
            time_mult,
            weather_mult,
            multi_modal_mult,
            equipment_mult,
            synergy_mult,
            efficiency_mult,
            class_match_mult,
            condition_mult,
            luck_bonus_sc,
            total_sc,
            capped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movement::{Segment, TransportMode, WeatherCode};
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // 2026-03-02 10:00 KST (01:00 UTC) - Morning 밴드, 배수 1.0
    fn neutral_time() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 1, 0, 0).unwrap()
    }

    fn walk_1km() -> MovementRecord {
        MovementRecord {
            segments: vec![Segment {
                mode: TransportMode::Walk,
                distance_m: 1000.0,
                duration_s: 720,
            }],
            started_at: neutral_time(),
            weather: WeatherCode::Clear,
        }
    }

    #[test]
    fn test_neutral_walk_base_equals_total() {
        // 도보 1km, 티어 0, 시간/날씨/보정 전부 중립, 행운 0%
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let breakdown = RewardEngine::compute_reward(
            &walk_1km(),
            0,
            &RewardModifiers::default(),
            &mut rng,
        )
        .unwrap();

        // floor(1000/100) = 10 단위 × 기본단가 2.0 × 도보 배수 1.0
        assert_eq!(breakdown.base_sc, 20.0);
        assert_eq!(breakdown.total_sc, 20);
        assert_eq!(breakdown.luck_bonus_sc, 0);
        assert_eq!(breakdown.tier_mult, 1.0);
        assert_eq!(breakdown.time_mult, 1.0);
        assert_eq!(breakdown.weather_mult, 1.0);
        assert_eq!(breakdown.multi_modal_mult, 1.0);
        assert!(!breakdown.capped);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let modifiers = RewardModifiers { luck_pct: 50.0, ..Default::default() };

        let mut rng1 = ChaCha8Rng::seed_from_u64(7);
        let mut rng2 = ChaCha8Rng::seed_from_u64(7);
        let a = RewardEngine::compute_reward(&walk_1km(), 2, &modifiers, &mut rng1).unwrap();
        let b = RewardEngine::compute_reward(&walk_1km(), 2, &modifiers, &mut rng2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_two_class_movement_gets_multi_modal_bonus() {
        let movement = MovementRecord {
            segments: vec![
                Segment { mode: TransportMode::Walk, distance_m: 1000.0, duration_s: 720 },
                Segment { mode: TransportMode::Bus, distance_m: 1000.0, duration_s: 300 },
            ],
            started_at: neutral_time(),
            weather: WeatherCode::Clear,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let breakdown =
            RewardEngine::compute_reward(&movement, 0, &RewardModifiers::default(), &mut rng)
                .unwrap();

        assert_eq!(breakdown.multi_modal_mult, 1.1);
        assert!(breakdown.multi_modal_mult > 1.0);
    }

    #[test]
    fn test_weather_ignored_for_transit_primary() {
        let movement = MovementRecord {
            segments: vec![
                Segment { mode: TransportMode::Bus, distance_m: 3000.0, duration_s: 600 },
                Segment { mode: TransportMode::Walk, distance_m: 500.0, duration_s: 400 },
            ],
            started_at: neutral_time(),
            weather: WeatherCode::Snow,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let breakdown =
            RewardEngine::compute_reward(&movement, 0, &RewardModifiers::default(), &mut rng)
                .unwrap();

        // 첫 세그먼트가 버스라서 날씨 배수 미적용
        assert_eq!(breakdown.weather_mult, 1.0);

        let movement = MovementRecord {
            segments: vec![Segment {
                mode: TransportMode::Walk,
                distance_m: 1000.0,
                duration_s: 720,
            }],
            started_at: neutral_time(),
            weather: WeatherCode::Snow,
        };
        let breakdown =
            RewardEngine::compute_reward(&movement, 0, &RewardModifiers::default(), &mut rng)
                .unwrap();
        assert_eq!(breakdown.weather_mult, 1.3);
    }

    #[test]
    fn test_luck_always_fires_at_100() {
        let modifiers = RewardModifiers { luck_pct: 100.0, ..Default::default() };
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let breakdown =
            RewardEngine::compute_reward(&walk_1km(), 0, &modifiers, &mut rng).unwrap();

        // floor(20.0 * 0.5) = 10
        assert_eq!(breakdown.luck_bonus_sc, 10);
        assert_eq!(breakdown.total_sc, 30);
    }

    #[test]
    fn test_daily_cap_truncates_after_luck() {
        // 장거리 러닝 + 최대 보정으로 티어 0 상한(500)을 넘긴다
        let movement = MovementRecord {
            segments: vec![Segment {
                mode: TransportMode::Run,
                distance_m: 30_000.0,
                duration_s: 9000,
            }],
            started_at: neutral_time(),
            weather: WeatherCode::Clear,
        };
        let modifiers = RewardModifiers { luck_pct: 100.0, ..Default::default() };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let breakdown =
            RewardEngine::compute_reward(&movement, 0, &modifiers, &mut rng).unwrap();

        assert!(breakdown.capped);
        assert_eq!(breakdown.total_sc, 500);
        // 상한 전 내역은 그대로 보존된다
        assert!(breakdown.luck_bonus_sc > 0);
        assert!(breakdown.base_sc > 500.0);
    }

    #[test]
    fn test_percent_modifiers_compose() {
        let modifiers = RewardModifiers {
            equipment_pct: 15.0,
            synergy_pct: 10.0,
            efficiency_pct: 20.0,
            class_match_pct: 5.0,
            condition_mult: 1.5,
            luck_pct: 0.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let breakdown =
            RewardEngine::compute_reward(&walk_1km(), 0, &modifiers, &mut rng).unwrap();

        assert_eq!(breakdown.equipment_mult, 1.15);
        assert_eq!(breakdown.synergy_mult, 1.1);
        assert_eq!(breakdown.efficiency_mult, 1.2);
        assert_eq!(breakdown.class_match_mult, 1.05);
        let expected = (20.0f32 * 1.15 * 1.1 * 1.2 * 1.05 * 1.5).floor() as i64;
        assert_eq!(breakdown.total_sc, expected);
    }

    #[test]
    fn test_rejects_invalid_input_before_computation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let empty = MovementRecord {
            segments: vec![],
            started_at: neutral_time(),
            weather: WeatherCode::Clear,
        };
        assert!(RewardEngine::compute_reward(&empty, 0, &RewardModifiers::default(), &mut rng)
            .is_err());

        let bad_luck = RewardModifiers { luck_pct: 200.0, ..Default::default() };
        assert!(RewardEngine::compute_reward(&walk_1km(), 0, &bad_luck, &mut rng).is_err());
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: 어떤 입력이든 최종 지급액은 티어 상한을 넘지 않는다
            #[test]
            fn prop_total_never_exceeds_cap(
                distance in 0.0f64..100_000.0,
                level in 0u8..6,
                luck in 0.0f32..100.0,
                seed in any::<u64>()
            ) {
                let movement = MovementRecord {
                    segments: vec![Segment {
                        mode: TransportMode::Run,
                        distance_m: distance,
                        duration_s: 600,
                    }],
                    started_at: neutral_time(),
                    weather: WeatherCode::Clear,
                };
                let modifiers = RewardModifiers { luck_pct: luck, ..Default::default() };
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let breakdown =
                    RewardEngine::compute_reward(&movement, level, &modifiers, &mut rng).unwrap();
                let cap = crate::catalog::tier_for_level(level).daily_cap_sc;
                prop_assert!(breakdown.total_sc <= cap);
                prop_assert!(breakdown.total_sc >= 0);
            }
        }
    }
}
