// 보상 계산 JSON API
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::{check_schema_version, err_code, error_codes, map_core_error};
use crate::models::movement::MovementRecord;
use crate::models::reward::{MilestoneHit, RewardBreakdown, RewardModifiers};
use crate::reward::{detect_milestones, RewardEngine};

#[derive(Debug, Deserialize)]
pub struct RewardRequest {
    pub schema_version: u8,
    /// 행운 시행에 쓰이는 시드 - 같은 요청이면 같은 결과가 나온다
    pub seed: u64,
    /// 보상 계산 시점의 스트라이드 레벨 (전이는 상태 기계 소관)
    pub stride_level: u8,
    pub movement: MovementRecord,
    #[serde(default)]
    pub modifiers: RewardModifiers,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RewardResponse {
    pub schema_version: u8,
    pub breakdown: RewardBreakdown,
    pub milestones: Vec<MilestoneHit>,
    /// 마일스톤 보너스 합계 - 원장에 별도 항목으로 적립된다
    pub milestone_total_sc: i64,
}

/// 이동 한 건의 보상 내역 + 마일스톤 계산
///
/// 순수 계산이므로 저장소가 필요 없다. 지급액 적립은 호출자 몫이다.
pub fn compute_reward_json(request_json: &str) -> Result<String, String> {
    let request: RewardRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema_version(request.schema_version)?;

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let breakdown = RewardEngine::compute_reward(
        &request.movement,
        request.stride_level,
        &request.modifiers,
        &mut rng,
    )
    .map_err(map_core_error)?;

    let milestones = detect_milestones(
        request.movement.total_distance_m(),
        request.movement.total_duration_s(),
    );
    let milestone_total_sc = milestones.iter().map(|hit| hit.bonus_sc).sum();

    let response = RewardResponse {
        schema_version: crate::SCHEMA_VERSION,
        breakdown,
        milestones,
        milestone_total_sc,
    };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::INTERNAL, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> serde_json::Value {
        json!({
            "schema_version": 1,
            "seed": 42,
            "stride_level": 0,
            "movement": {
                "segments": [
                    {"mode": "walk", "distance_m": 1200.0, "duration_s": 900}
                ],
                "started_at": "2026-03-02T01:00:00Z",
                "weather": "clear"
            }
        })
    }

    #[test]
    fn test_compute_reward_json_roundtrip() {
        let result = compute_reward_json(&request().to_string());
        assert!(result.is_ok(), "unexpected error: {:?}", result);

        let parsed: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        // floor(1200/100) = 12 단위 × 2.0
        assert_eq!(parsed["breakdown"]["base_sc"], 24.0);
        assert_eq!(parsed["breakdown"]["total_sc"], 24);
        // 1km 거리 + 10분 시간 마일스톤
        assert_eq!(parsed["milestones"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["milestone_total_sc"], 15);
    }

    #[test]
    fn test_rejects_wrong_schema_version() {
        let mut req = request();
        req["schema_version"] = json!(9);
        let error = compute_reward_json(&req.to_string()).unwrap_err();
        assert!(error.starts_with(super::error_codes::INVALID_SCHEMA_VERSION));
    }

    #[test]
    fn test_rejects_unknown_weather_code() {
        let mut req = request();
        req["movement"]["weather"] = json!("volcanic_ash");
        let error = compute_reward_json(&req.to_string()).unwrap_err();
        assert!(error.starts_with(super::error_codes::INVALID_REQUEST));
    }

    #[test]
    fn test_rejects_out_of_range_stats() {
        let mut req = request();
        req["modifiers"] = json!({"luck_pct": 250.0});
        let error = compute_reward_json(&req.to_string()).unwrap_err();
        assert!(error.starts_with(super::error_codes::VALIDATION));
    }
}
