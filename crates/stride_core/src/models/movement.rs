// 이동 기록 모델 - 세그먼트/이동수단/날씨
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// 이동수단
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walk,
    Run,
    Bike,
    Bus,
    Subway,
    Train,
    Car,
}

/// 이동수단 클래스 - 멀티모달 보너스 계산 단위
///
/// Coarser than the raw mode: the multi-modal bonus counts distinct classes
/// within one movement, and weather only applies to human-powered movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransportClass {
    HumanPowered,
    Transit,
    Motor,
}

impl TransportMode {
    /// 100m 단위당 기본 SC
    pub fn base_rate(&self) -> f32 {
        match self {
            TransportMode::Walk => 2.0,
            TransportMode::Run => 2.0,
            TransportMode::Bike => 1.5,
            TransportMode::Bus => 1.0,
            TransportMode::Subway => 1.0,
            TransportMode::Train => 1.0,
            TransportMode::Car => 0.5,
        }
    }

    /// 이동수단별 보상 배수
    pub fn reward_multiplier(&self) -> f32 {
        match self {
            TransportMode::Walk => 1.0,
            TransportMode::Run => 1.2,
            TransportMode::Bike => 1.0,
            TransportMode::Bus => 0.8,
            TransportMode::Subway => 0.8,
            TransportMode::Train => 0.7,
            TransportMode::Car => 0.5,
        }
    }

    pub fn class(&self) -> TransportClass {
        match self {
            TransportMode::Walk | TransportMode::Run | TransportMode::Bike => {
                TransportClass::HumanPowered
            }
            TransportMode::Bus | TransportMode::Subway | TransportMode::Train => {
                TransportClass::Transit
            }
            TransportMode::Car => TransportClass::Motor,
        }
    }

    /// 날씨 배수를 적용받는 이동수단인지
    pub fn is_weather_sensitive(&self) -> bool {
        self.class() == TransportClass::HumanPowered
    }

    /// 디스플레이용 텍스트
    pub fn display_text(&self) -> &'static str {
        match self {
            TransportMode::Walk => "도보",
            TransportMode::Run => "러닝",
            TransportMode::Bike => "자전거",
            TransportMode::Bus => "버스",
            TransportMode::Subway => "지하철",
            TransportMode::Train => "기차",
            TransportMode::Car => "자동차",
        }
    }
}

/// 날씨 코드 (외부 날씨 API가 내려주는 값을 정규화한 enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCode {
    Clear,
    Clouds,
    Mist,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherCode {
    /// 날씨 배수 - 궂은 날씨일수록 사람이 직접 움직이는 이동에 보너스
    pub fn reward_multiplier(&self) -> f32 {
        match self {
            WeatherCode::Clear => 1.0,
            WeatherCode::Clouds => 1.0,
            WeatherCode::Mist => 1.05,
            WeatherCode::Drizzle => 1.1,
            WeatherCode::Rain => 1.2,
            WeatherCode::Snow => 1.3,
            WeatherCode::Thunderstorm => 1.4,
        }
    }
}

/// 단일 이동수단으로 이어진 이동 구간
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    pub mode: TransportMode,
    /// 미터
    pub distance_m: f64,
    /// 초
    pub duration_s: u32,
}

impl Segment {
    pub fn validate(&self) -> Result<()> {
        if !self.distance_m.is_finite() || self.distance_m < 0.0 {
            return Err(CoreError::InvalidParameter(format!(
                "segment distance must be finite and >= 0, got {}",
                self.distance_m
            )));
        }
        Ok(())
    }
}

/// 완료된 한 번의 이동
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MovementRecord {
    pub segments: Vec<Segment>,
    /// 이동 시작 시각 (UTC)
    pub started_at: DateTime<Utc>,
    pub weather: WeatherCode,
}

impl MovementRecord {
    pub fn total_distance_m(&self) -> f64 {
        self.segments.iter().map(|s| s.distance_m).sum()
    }

    pub fn total_duration_s(&self) -> u32 {
        self.segments.iter().map(|s| s.duration_s).sum()
    }

    /// 도보/러닝 구간 거리 합
    pub fn walk_distance_m(&self) -> f64 {
        self.segments
            .iter()
            .filter(|s| matches!(s.mode, TransportMode::Walk | TransportMode::Run))
            .map(|s| s.distance_m)
            .sum()
    }

    /// 첫 구간의 이동수단 - 날씨 민감도 판정 기준
    pub fn primary_mode(&self) -> Option<TransportMode> {
        self.segments.first().map(|s| s.mode)
    }

    /// 이동에 쓰인 서로 다른 이동수단 클래스 수
    pub fn distinct_class_count(&self) -> usize {
        let mut classes: Vec<TransportClass> =
            self.segments.iter().map(|s| s.mode.class()).collect();
        classes.sort_by_key(|c| *c as u8);
        classes.dedup();
        classes.len()
    }

    pub fn is_multi_modal(&self) -> bool {
        self.distinct_class_count() >= 2
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(CoreError::InvalidParameter(
                "movement must contain at least one segment".to_string(),
            ));
        }
        for segment in &self.segments {
            segment.validate()?;
        }
        Ok(())
    }
}
