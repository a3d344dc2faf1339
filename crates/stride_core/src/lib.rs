//! # stride_core - Stride Reward & Progression Engine
//!
//! This library converts completed movements into currency payouts and drives
//! the long-lived player progression state machines of the Stride
//! move-to-earn service: streak tiers, daily missions, weekly challenges and
//! achievements.
//!
//! ## Features
//! - Deterministic reward computation (same request + seed = same payout)
//! - Pure, injectable day-boundary logic (no wall-clock reads)
//! - Idempotent, replay-safe progress aggregation
//! - JSON API for easy integration with the host app server

// Allow unused code for features under development
#![allow(dead_code)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Engine entry points carry many contextual parameters
#![allow(clippy::too_many_arguments)]

pub mod achievement;
pub mod api;
pub mod catalog;
pub mod challenge;
pub mod clock;
pub mod error;
pub mod mission;
pub mod models;
pub mod progress;
pub mod reward;
pub mod store;
pub mod stride;

// Re-export main API functions
pub use api::{
    claim_mission_json, claim_weekly_json, compute_reward_json, daily_missions_json,
    evaluate_stride_json, progress_event_json,
};
pub use error::{CoreError, Result};

// Re-export core domain types
pub use achievement::{AchievementCategory, AchievementDef, AchievementState};
pub use challenge::{WeeklyChallengeState, WeeklyTierReward};
pub use mission::{DailyMissionInstance, MissionStatus, MissionTemplate, MissionType};
pub use models::{
    MilestoneHit, MovementRecord, ProgressEvent, ProgressSources, RewardBreakdown,
    RewardModifiers, Segment, TransportClass, TransportMode, WeatherCode,
};
pub use progress::{MissionClaim, ProgressEngine, ProgressReport};
pub use reward::{detect_milestones, RewardEngine};
pub use store::{MemoryStore, ProgressStore, StoreError};
pub use stride::{StrideMachine, StrideState, StrideTier};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sha2::{Digest, Sha256};

    fn reward_request(seed: u64) -> String {
        json!({
            "schema_version": 1,
            "seed": seed,
            "stride_level": 2,
            "movement": {
                "segments": [
                    {"mode": "walk", "distance_m": 1800.0, "duration_s": 1500},
                    {"mode": "subway", "distance_m": 9000.0, "duration_s": 1200},
                    {"mode": "walk", "distance_m": 600.0, "duration_s": 500}
                ],
                "started_at": "2026-03-02T08:30:00Z",
                "weather": "rain"
            },
            "modifiers": {
                "equipment_pct": 15.0,
                "synergy_pct": 5.0,
                "efficiency_pct": 10.0,
                "condition_mult": 1.25,
                "luck_pct": 35.0
            }
        })
        .to_string()
    }

    #[test]
    fn test_reward_json_determinism_sha256() {
        fn sha256_hex(bytes: &[u8]) -> String {
            let mut hasher = Sha256::new();
            hasher.update(bytes);
            let digest = hasher.finalize();
            let mut out = String::with_capacity(digest.len() * 2);
            for b in digest {
                out.push_str(&format!("{:02x}", b));
            }
            out
        }

        let request = reward_request(123_456);
        let result1 = compute_reward_json(&request).unwrap();
        let result2 = compute_reward_json(&request).unwrap();

        let h1 = sha256_hex(result1.as_bytes());
        let h2 = sha256_hex(result2.as_bytes());
        assert_eq!(h1, h2, "same seed should produce identical response sha256");
    }

    #[test]
    fn test_full_flow_reward_then_progress() {
        // 보상 계산 -> (호스트가 적립) -> 진행도 집계의 전체 흐름
        let reward = compute_reward_json(&reward_request(7)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&reward).unwrap();
        assert!(parsed["breakdown"]["total_sc"].as_i64().unwrap() > 0);
        // 멀티모달 (도보 + 지하철)
        let multi_modal = parsed["breakdown"]["multi_modal_mult"].as_f64().unwrap();
        assert!((multi_modal - 1.1).abs() < 1e-6);

        let store = MemoryStore::new();
        let event = json!({
            "schema_version": 1,
            "user_id": "user-001",
            "now": "2026-03-02T08:40:00Z",
            "event": {
                "type": "movement_completed",
                "distance_m": 11400.0,
                "walk_distance_m": 2400.0,
                "duration_s": 3200,
                "multi_modal": true
            }
        });
        let report = progress_event_json(&store, &event.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert!(parsed["report"]["errors"].as_array().unwrap().is_empty());

        let stride = store.load_stride("user-001").unwrap().unwrap();
        assert_eq!(stride.streak_days, 1);
        assert_eq!(stride.lifetime_distance_m, 11_400.0);
    }

    #[test]
    fn test_transport_modes_are_exhaustively_classified() {
        use strum::IntoEnumIterator;

        // serde 이름과 클래스 매핑이 모든 모드에 대해 정의되어 있는지
        #[derive(Debug, strum_macros::EnumIter)]
        enum AllModes {
            Walk,
            Run,
            Bike,
            Bus,
            Subway,
            Train,
            Car,
        }

        for mode in AllModes::iter() {
            let name = format!("{:?}", mode).to_lowercase();
            let parsed: TransportMode =
                serde_json::from_value(json!(name)).expect("every mode parses");
            assert!(parsed.base_rate() > 0.0);
            assert!(parsed.reward_multiplier() > 0.0);
            assert!(!parsed.display_text().is_empty());
        }
    }
}
