// 보상 배수 고정 테이블 - 시간대 밴드, 멀티모달
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 시간대 밴드 - 8개 구간이 겹치지 않게 24시간을 커버한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    /// 새벽 04-07시
    Dawn,
    /// 출근 07-09시
    MorningCommute,
    /// 오전 09-11시
    Morning,
    /// 점심 11-14시
    Lunch,
    /// 오후 14-17시
    Afternoon,
    /// 퇴근 17-20시
    EveningCommute,
    /// 저녁 20-23시
    Evening,
    /// 심야 23-04시
    Night,
}

impl TimeBand {
    /// KST 시각(0..=23)이 속한 밴드
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            4..=6 => TimeBand::Dawn,
            7..=8 => TimeBand::MorningCommute,
            9..=10 => TimeBand::Morning,
            11..=13 => TimeBand::Lunch,
            14..=16 => TimeBand::Afternoon,
            17..=19 => TimeBand::EveningCommute,
            20..=22 => TimeBand::Evening,
            _ => TimeBand::Night,
        }
    }

    /// 시간대 보상 배수
    pub fn reward_multiplier(&self) -> f32 {
        match self {
            TimeBand::Dawn => 1.2,
            TimeBand::MorningCommute => 1.15,
            TimeBand::Morning => 1.0,
            TimeBand::Lunch => 1.05,
            TimeBand::Afternoon => 1.0,
            TimeBand::EveningCommute => 1.15,
            TimeBand::Evening => 1.0,
            TimeBand::Night => 0.9,
        }
    }

    /// 디스플레이용 텍스트
    pub fn display_text(&self) -> &'static str {
        match self {
            TimeBand::Dawn => "새벽",
            TimeBand::MorningCommute => "출근길",
            TimeBand::Morning => "오전",
            TimeBand::Lunch => "점심",
            TimeBand::Afternoon => "오후",
            TimeBand::EveningCommute => "퇴근길",
            TimeBand::Evening => "저녁",
            TimeBand::Night => "심야",
        }
    }
}

/// 멀티모달 배수 - 이동수단 클래스 수 기준
///
/// Single-segment movements always land in the 1-class (neutral) bucket.
pub fn multi_modal_multiplier(distinct_classes: usize) -> f32 {
    match distinct_classes {
        0 | 1 => 1.0,
        2 => 1.1,
        _ => 1.25,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_cover_every_hour() {
        // 24시간 전부 어떤 밴드든 배수가 나와야 한다
        for hour in 0..24 {
            let band = TimeBand::for_hour(hour);
            assert!(band.reward_multiplier() > 0.0, "hour {} missing band", hour);
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TimeBand::for_hour(4), TimeBand::Dawn);
        assert_eq!(TimeBand::for_hour(6), TimeBand::Dawn);
        assert_eq!(TimeBand::for_hour(7), TimeBand::MorningCommute);
        assert_eq!(TimeBand::for_hour(23), TimeBand::Night);
        assert_eq!(TimeBand::for_hour(0), TimeBand::Night);
        assert_eq!(TimeBand::for_hour(3), TimeBand::Night);
    }

    #[test]
    fn test_multi_modal_levels() {
        assert_eq!(multi_modal_multiplier(1), 1.0);
        assert!(multi_modal_multiplier(2) > multi_modal_multiplier(1));
        assert!(multi_modal_multiplier(3) > multi_modal_multiplier(2));
        // 3개 이상은 모두 같은 최고 단계
        assert_eq!(multi_modal_multiplier(3), multi_modal_multiplier(5));
    }
}
