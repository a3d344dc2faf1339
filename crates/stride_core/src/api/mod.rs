//! JSON 문자열 API
//!
//! 호스트 앱 서버가 엔진을 언어 경계 없이 쓰도록 요청/응답을 JSON 문자열로
//! 주고받는다. 모든 요청은 `schema_version`을 명시하고, 기준 시각을 직접
//! 담아야 한다 - 엔진은 벽시계를 읽지 않는다.

pub mod progress_json;
pub mod reward_json;

pub use progress_json::{
    claim_mission_json, claim_weekly_json, daily_missions_json, evaluate_stride_json,
    progress_event_json,
};
pub use reward_json::{compute_reward_json, RewardRequest, RewardResponse};

/// API 에러 코드
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "E_INVALID_REQUEST";
    pub const INVALID_SCHEMA_VERSION: &str = "E_INVALID_SCHEMA_VERSION";
    pub const VALIDATION: &str = "E_VALIDATION";
    pub const NOT_FOUND: &str = "E_NOT_FOUND";
    pub const STORE: &str = "E_STORE";
    pub const INTERNAL: &str = "E_INTERNAL";
}

pub(crate) fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

pub(crate) fn check_schema_version(version: u8) -> Result<(), String> {
    if version != crate::SCHEMA_VERSION {
        return Err(err_code(
            error_codes::INVALID_SCHEMA_VERSION,
            format!("expected {}, got {}", crate::SCHEMA_VERSION, version),
        ));
    }
    Ok(())
}

pub(crate) fn map_core_error(error: crate::error::CoreError) -> String {
    use crate::error::CoreError;
    match &error {
        CoreError::InvalidParameter(_) => err_code(error_codes::VALIDATION, error),
        CoreError::NotFound(_) => err_code(error_codes::NOT_FOUND, error),
        CoreError::Store(_) => err_code(error_codes::STORE, error),
        _ => err_code(error_codes::INTERNAL, error),
    }
}
