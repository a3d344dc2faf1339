// 스트라이드 진행 상태 기계
//
// 연속 이동 일수(스트릭)와 티어, 쉴드를 달력일 단위로 전이시킨다.
// 순수 함수이며 달력일 경계당 최대 한 번 호출되어야 한다. 기준 날짜는
// 호출자가 주입하고, 결과 상태의 영속화도 호출자 책임이다.
use chrono::NaiveDate;

use crate::catalog::{level_for_streak, tier_for_level};
use crate::clock;
use crate::stride::types::StrideState;

/// 보유 가능한 최대 쉴드 수
pub const MAX_SHIELDS: u8 = 3;

/// 이 일수 이상 비우면 전체 리셋
pub const ABSENCE_RESET_DAYS: u32 = 7;

/// 쉴드 없이 하루 비울 때마다 떨어지는 레벨 수
pub const LEVEL_DROP_PER_DAY: u32 = 1;

/// 스트라이드 전이 엔진
pub struct StrideMachine;

impl StrideMachine {
    /// 하루치 전이
    ///
    /// `days_missed == 0`: 오늘 활동함. 스트릭 +1, 레벨은 테이블 상단부터
    /// 재계산, 레벨업 시 해당 티어의 쉴드 지급 (상한 적용). 활동일에
    /// 스트릭이 줄어드는 일은 없다.
    ///
    /// `days_missed >= ABSENCE_RESET_DAYS`: 전체 리셋. 스트릭 0, 레벨 0.
    /// 쉴드는 소모되지 않고 보존된다 - 리셋을 막지 못할 뿐이다.
    ///
    /// `0 < days_missed < ABSENCE_RESET_DAYS`, 쉴드 있음: 며칠을 비웠든
    /// 쉴드 정확히 1개 소모, 스트릭/레벨은 그대로.
    ///
    /// `0 < days_missed < ABSENCE_RESET_DAYS`, 쉴드 없음: 레벨이
    /// `days_missed × LEVEL_DROP_PER_DAY`만큼 하락 (0 바닥), 스트릭은 새
    /// 레벨의 최소 요구 일수로 내려앉는다 - 0도 아니고, 초과분 보존도 아니다.
    pub fn transition(state: &StrideState, days_missed: u32) -> StrideState {
        let mut next = state.clone();

        if days_missed == 0 {
            next.streak_days = state.streak_days + 1;
            let new_level = level_for_streak(next.streak_days);
            if new_level > state.level {
                let award = tier_for_level(new_level).shield_award;
                next.shields = (state.shields + award).min(MAX_SHIELDS);
            }
            next.level = new_level;
            next.longest_streak = next.longest_streak.max(next.streak_days);
            return next;
        }

        if days_missed >= ABSENCE_RESET_DAYS {
            next.streak_days = 0;
            next.level = 0;
            return next;
        }

        if state.shields > 0 {
            next.shields = state.shields - 1;
            return next;
        }

        let dropped = (state.level as u32).saturating_sub(days_missed * LEVEL_DROP_PER_DAY) as u8;
        next.level = dropped;
        next.streak_days = tier_for_level(dropped).required_streak;
        next
    }

    /// 이동 기록 시점의 달력일 평가
    ///
    /// `last_active`와 기준일에서 비운 일수를 계산해 전이를 합성한다.
    /// 같은 날 두 번 호출해도 상태가 변하지 않는다 (하루 1회 멱등 가드).
    pub fn evaluate_day(state: &StrideState, today: NaiveDate) -> StrideState {
        let gap = match state.last_active {
            // 신규 유저 - 오늘이 첫 활동일
            None => 1,
            Some(last) => clock::days_between(last, today),
        };

        if gap <= 0 {
            // 오늘 이미 평가됨 (혹은 시계 역행) - 변경 없음
            return state.clone();
        }

        let mut next = if gap == 1 {
            Self::transition(state, 0)
        } else {
            // 비운 날들에 대한 전이를 먼저 적용한 뒤 오늘의 활동을 반영
            let after_gap = Self::transition(state, (gap - 1) as u32);
            Self::transition(&after_gap, 0)
        };
        next.last_active = Some(today);
        next
    }

    /// 누적 이동 거리 반영
    pub fn record_distance(state: &mut StrideState, distance_m: f64) {
        if distance_m.is_finite() && distance_m > 0.0 {
            state.lifetime_distance_m += distance_m;
        }
    }
}
