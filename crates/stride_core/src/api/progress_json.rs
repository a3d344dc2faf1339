// 진행도/스트라이드 JSON API
//
// 저장소는 호스트가 주입한다. 모든 요청은 기준 시각(`now`, RFC3339 UTC)을
// 담아야 하며 "오늘" 판정은 전부 그 시각의 KST 날짜로 이루어진다.
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::{check_schema_version, err_code, error_codes, map_core_error};
use crate::catalog::tier_for_level;
use crate::challenge::WeeklyTierReward;
use crate::mission::types::DailyMissionInstance;
use crate::models::event::ProgressEvent;
use crate::progress::{MissionClaim, ProgressEngine, ProgressReport};
use crate::store::ProgressStore;
use crate::stride::types::{StrideState, StrideTier};

#[derive(Debug, Deserialize)]
pub struct ProgressEventRequest {
    pub schema_version: u8,
    pub user_id: String,
    pub now: DateTime<Utc>,
    pub event: ProgressEvent,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ProgressEventResponse {
    pub schema_version: u8,
    pub report: ProgressReport,
}

/// 도메인 이벤트 반영
///
/// 보상 지급이 커밋된 뒤에 호출해야 한다. 그룹별 실패는 응답 리포트의
/// `errors`로만 전달되고 호출 자체는 성공한다.
pub fn progress_event_json(
    store: &dyn ProgressStore,
    request_json: &str,
) -> Result<String, String> {
    let request: ProgressEventRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema_version(request.schema_version)?;

    let engine = ProgressEngine::new(store, request.now);
    let report = engine.on_event(&request.user_id, &request.event);

    let response = ProgressEventResponse { schema_version: crate::SCHEMA_VERSION, report };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::INTERNAL, e))
}

#[derive(Debug, Deserialize)]
pub struct DailyMissionsRequest {
    pub schema_version: u8,
    pub user_id: String,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct DailyMissionsResponse {
    pub schema_version: u8,
    pub date: chrono::NaiveDate,
    pub missions: Vec<DailyMissionInstance>,
}

/// 오늘의 미션 조회 (첫 접근 시 생성)
pub fn daily_missions_json(
    store: &dyn ProgressStore,
    request_json: &str,
) -> Result<String, String> {
    let request: DailyMissionsRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema_version(request.schema_version)?;

    let engine = ProgressEngine::new(store, request.now);
    let missions = engine.daily_missions(&request.user_id).map_err(map_core_error)?;

    let response = DailyMissionsResponse {
        schema_version: crate::SCHEMA_VERSION,
        date: engine.today(),
        missions,
    };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::INTERNAL, e))
}

#[derive(Debug, Deserialize)]
pub struct ClaimMissionRequest {
    pub schema_version: u8,
    pub user_id: String,
    pub now: DateTime<Utc>,
    pub mission_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ClaimMissionResponse {
    pub schema_version: u8,
    pub claim: MissionClaim,
}

/// 미션 보상 수령
pub fn claim_mission_json(
    store: &dyn ProgressStore,
    request_json: &str,
) -> Result<String, String> {
    let request: ClaimMissionRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema_version(request.schema_version)?;

    let engine = ProgressEngine::new(store, request.now);
    let claim =
        engine.claim_mission(&request.user_id, &request.mission_id).map_err(map_core_error)?;

    let response = ClaimMissionResponse { schema_version: crate::SCHEMA_VERSION, claim };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::INTERNAL, e))
}

#[derive(Debug, Deserialize)]
pub struct ClaimWeeklyRequest {
    pub schema_version: u8,
    pub user_id: String,
    pub now: DateTime<Utc>,
    pub tier: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ClaimWeeklyResponse {
    pub schema_version: u8,
    pub reward: WeeklyTierReward,
}

/// 주간 챌린지 티어 수령
pub fn claim_weekly_json(
    store: &dyn ProgressStore,
    request_json: &str,
) -> Result<String, String> {
    let request: ClaimWeeklyRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema_version(request.schema_version)?;

    let engine = ProgressEngine::new(store, request.now);
    let reward =
        engine.claim_weekly_tier(&request.user_id, request.tier).map_err(map_core_error)?;

    let response = ClaimWeeklyResponse { schema_version: crate::SCHEMA_VERSION, reward };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::INTERNAL, e))
}

#[derive(Debug, Deserialize)]
pub struct EvaluateStrideRequest {
    pub schema_version: u8,
    pub user_id: String,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct EvaluateStrideResponse {
    pub schema_version: u8,
    pub state: StrideState,
    /// 현재 레벨의 티어 행 - 클라이언트 표시용
    pub tier: StrideTier,
}

/// 오늘의 스트라이드 평가
///
/// 하루에 한 번만 실효가 있고, 같은 날의 재호출은 상태를 바꾸지 않는다.
/// 응답의 티어 배수는 이후 보상 계산 요청의 `stride_level`에 대응한다.
pub fn evaluate_stride_json(
    store: &dyn ProgressStore,
    request_json: &str,
) -> Result<String, String> {
    let request: EvaluateStrideRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema_version(request.schema_version)?;

    let engine = ProgressEngine::new(store, request.now);
    let state = engine.evaluate_stride(&request.user_id).map_err(map_core_error)?;
    let tier = tier_for_level(state.level).clone();

    let response = EvaluateStrideResponse { schema_version: crate::SCHEMA_VERSION, state, tier };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::INTERNAL, e))
}
