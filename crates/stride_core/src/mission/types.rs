use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 일일 미션 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
    /// 오늘 총 이동 거리 (m)
    TotalDistance,
    /// 오늘 도보/러닝 거리 (m)
    WalkDistance,
    /// 오늘 이동 횟수
    MoveCount,
    /// 퀘스트 완료 수
    QuestClear,
    /// 미니게임 플레이 수
    GamePlay,
    /// 멀티모달 이동 수
    MultiModal,
}

/// 미션 상태 - 전이는 한 방향으로만 (Active -> Completed -> Claimed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Active,
    Completed,
    Claimed,
}

/// 일일 미션 템플릿 (`data/catalog/mission_templates.yaml`의 한 줄)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MissionTemplate {
    pub id: String,
    pub mission_type: MissionType,
    pub target: i64,
    pub reward_sc: i64,
    pub reward_bp: i64,
    pub description: String,
}

/// 유저별-일자별 미션 인스턴스
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyMissionInstance {
    pub id: String,
    pub template_id: String,
    pub date: NaiveDate,
    pub mission_type: MissionType,
    pub description: String,
    pub target: i64,
    /// 현재 진행도, target을 넘지 않는다
    pub current: i64,
    pub reward_sc: i64,
    pub reward_bp: i64,
    pub status: MissionStatus,
}

impl DailyMissionInstance {
    pub fn from_template(template: &MissionTemplate, date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            template_id: template.id.clone(),
            date,
            mission_type: template.mission_type,
            description: template.description.clone(),
            target: template.target,
            current: 0,
            reward_sc: template.reward_sc,
            reward_bp: template.reward_bp,
            status: MissionStatus::Active,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }

    /// 진행도 증가 - target에서 클램프되며, 목표 도달 시 Active -> Completed
    /// 전이를 정확히 한 번만 수행한다. 이미 완료/수령된 미션에는 아무 효과 없음.
    ///
    /// Returns true when this call crossed the target.
    pub fn update_progress(&mut self, value: i64) -> bool {
        if self.status != MissionStatus::Active || value <= 0 {
            return false;
        }
        self.current = (self.current + value).min(self.target);
        if self.current >= self.target {
            self.status = MissionStatus::Completed;
            return true;
        }
        false
    }

    /// Completed -> Claimed 전이. 해당 상태가 아니면 false.
    pub fn claim(&mut self) -> bool {
        if self.status != MissionStatus::Completed {
            return false;
        }
        self.status = MissionStatus::Claimed;
        true
    }
}
