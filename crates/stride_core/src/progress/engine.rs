// 진행도 집계 엔진
//
// 정규화된 도메인 이벤트 하나를 받아 일일 미션 / 주간 챌린지 / 업적을
// 갱신한다. 이벤트를 만든 보상 지급은 이미 커밋된 뒤이므로 여기서의 실패는
// 지급을 되돌리지 않는다. 세 갱신 그룹은 서로 독립적으로 시도되고, 실패는
// 로그와 리포트로만 드러난다.
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::achievement::readers::recompute_progress;
use crate::catalog::achievement_catalog;
use crate::challenge::WeeklyTierReward;
use crate::clock;
use crate::error::{CoreError, Result};
use crate::mission::generate_daily_missions;
use crate::mission::types::{DailyMissionInstance, MissionType};
use crate::models::event::{ProgressEvent, ProgressSources};
use crate::store::ProgressStore;
use crate::stride::machine::StrideMachine;
use crate::stride::types::StrideState;

/// 이벤트 한 건 처리 결과
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProgressReport {
    /// 이번 이벤트로 목표에 도달한 미션들
    pub completed_missions: Vec<DailyMissionInstance>,
    /// 이번 이벤트로 완료된 업적 코드들
    pub completed_achievements: Vec<String>,
    /// 그룹별 실패 메시지 - 비어 있으면 전부 성공
    pub errors: Vec<String>,
}

/// 미션 수령 결과
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MissionClaim {
    pub mission_id: String,
    pub reward_sc: i64,
    pub reward_bp: i64,
    /// 이 수령으로 오늘 미션 3개가 모두 수령 완료되었는지
    pub all_clear: bool,
}

/// 진행도 집계 엔진
///
/// 기준 시각은 생성 시 한 번 주입되고, 모든 "오늘" 판정은 그로부터 파생된
/// KST 날짜를 쓴다.
pub struct ProgressEngine<'a> {
    store: &'a dyn ProgressStore,
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl<'a> ProgressEngine<'a> {
    pub fn new(store: &'a dyn ProgressStore, now: DateTime<Utc>) -> Self {
        let today = clock::service_date(now);
        Self { store, now, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // ========================
    // Daily Missions
    // ========================

    /// 오늘의 미션 조회 - 첫 접근 시 결정적으로 생성해 영속화한다
    ///
    /// 이미 생성된 날짜에는 저장된 인스턴스를 그대로 돌려주므로 재호출이
    /// 진행도를 건드리거나 중복을 만들지 않는다.
    pub fn daily_missions(&self, user_id: &str) -> Result<Vec<DailyMissionInstance>> {
        if let Some(existing) = self.store.load_daily_missions(user_id, self.today)? {
            return Ok(existing);
        }
        let generated = generate_daily_missions(user_id, self.today);
        Ok(self.store.init_daily_missions(user_id, self.today, generated)?)
    }

    /// 미션 보상 수령 - Completed -> Claimed 가드 전이
    ///
    /// 마지막 미션까지 수령되면 올클리어로 판정하고, 올클리어 이벤트를
    /// 집계에 피드백한다 (보상 지급 자체는 호출자/원장 소관).
    pub fn claim_mission(&self, user_id: &str, mission_id: &str) -> Result<MissionClaim> {
        // 오늘 레코드가 아직 없으면 먼저 생성해 NotFound가 미션 기준으로 나온다
        self.daily_missions(user_id)?;

        let mut claim: Option<MissionClaim> = None;
        let mut found = false;

        let missions = self.store.update_daily_missions(user_id, self.today, &mut |missions| {
            if let Some(mission) = missions.iter_mut().find(|m| m.id == mission_id) {
                found = true;
                if mission.claim() {
                    claim = Some(MissionClaim {
                        mission_id: mission.id.clone(),
                        reward_sc: mission.reward_sc,
                        reward_bp: mission.reward_bp,
                        all_clear: false,
                    });
                }
            }
        })?;

        if !found {
            return Err(CoreError::NotFound(format!("mission not found: {}", mission_id)));
        }
        let mut claim = claim.ok_or_else(|| {
            CoreError::InvalidParameter(format!("mission {} is not claimable", mission_id))
        })?;

        if missions.iter().all(|m| m.status == crate::mission::types::MissionStatus::Claimed) {
            claim.all_clear = true;
            // 올클리어는 집계 이벤트로 피드백된다 - 실패해도 수령은 유효
            let report = self.on_event(user_id, &ProgressEvent::AllClearAchieved);
            for error in report.errors {
                warn!(user_id, %error, "all-clear aggregation failed");
            }
        }

        Ok(claim)
    }

    // ========================
    // Weekly Challenge
    // ========================

    /// 이번 주 챌린지 티어 수령
    pub fn claim_weekly_tier(&self, user_id: &str, tier: usize) -> Result<WeeklyTierReward> {
        let week_key = clock::iso_week_key(self.today);
        let mut outcome: Option<Result<WeeklyTierReward>> = None;
        self.store.update_weekly(user_id, &week_key, &mut |weekly| {
            outcome = Some(weekly.claim_tier(tier));
        })?;
        outcome.unwrap_or_else(|| {
            Err(CoreError::ProcessingError("weekly claim closure did not run".to_string()))
        })
    }

    // ========================
    // Stride Evaluation
    // ========================

    /// 오늘의 스트라이드 평가 - 하루 한 번만 실효, 재호출은 no-op
    pub fn evaluate_stride(&self, user_id: &str) -> Result<StrideState> {
        let today = self.today;
        Ok(self.store.update_stride(user_id, &mut |state| {
            *state = StrideMachine::evaluate_day(state, today);
        })?)
    }

    // ========================
    // Event Aggregation
    // ========================

    /// 도메인 이벤트 한 건 반영
    ///
    /// 미션 / 주간 챌린지 / 업적 세 그룹을 독립적으로 갱신한다. 한 그룹의
    /// 실패가 다른 그룹의 시도를 막지 않으며, 호출자에게 에러를 던지지도
    /// 않는다 - 실패는 리포트의 `errors`로만 전달된다.
    pub fn on_event(&self, user_id: &str, event: &ProgressEvent) -> ProgressReport {
        let mut report = ProgressReport::default();

        if let Err(error) = self.update_missions(user_id, event, &mut report) {
            warn!(user_id, %error, "daily mission update failed");
            report.errors.push(format!("missions: {}", error));
        }

        if let Err(error) = self.update_weekly(user_id, event) {
            warn!(user_id, %error, "weekly challenge update failed");
            report.errors.push(format!("weekly: {}", error));
        }

        if let Err(error) = self.update_achievements(user_id, event, &mut report) {
            warn!(user_id, %error, "achievement update failed");
            report.errors.push(format!("achievements: {}", error));
        }

        report
    }

    /// 이벤트가 미션 타입에 주는 진행량
    fn mission_increment(event: &ProgressEvent, mission_type: MissionType) -> i64 {
        match (event, mission_type) {
            (ProgressEvent::MovementCompleted { distance_m, .. }, MissionType::TotalDistance) => {
                distance_m.floor() as i64
            }
            (
                ProgressEvent::MovementCompleted { walk_distance_m, .. },
                MissionType::WalkDistance,
            ) => walk_distance_m.floor() as i64,
            (ProgressEvent::MovementCompleted { .. }, MissionType::MoveCount) => 1,
            (ProgressEvent::MovementCompleted { multi_modal, .. }, MissionType::MultiModal) => {
                i64::from(*multi_modal)
            }
            (ProgressEvent::QuestCompleted, MissionType::QuestClear) => 1,
            (ProgressEvent::GamePlayed, MissionType::GamePlay) => 1,
            _ => 0,
        }
    }

    fn update_missions(
        &self,
        user_id: &str,
        event: &ProgressEvent,
        report: &mut ProgressReport,
    ) -> Result<()> {
        // 올클리어 이벤트는 미션 진행과 무관하다
        if matches!(event, ProgressEvent::AllClearAchieved) {
            return Ok(());
        }

        // 오늘 레코드를 게으르게 생성한 뒤 갱신
        self.daily_missions(user_id)?;

        let mut completed = Vec::new();
        self.store.update_daily_missions(user_id, self.today, &mut |missions| {
            for mission in missions.iter_mut() {
                let increment = Self::mission_increment(event, mission.mission_type);
                if increment > 0 && mission.update_progress(increment) {
                    completed.push(mission.clone());
                }
            }
        })?;

        report.completed_missions = completed;
        Ok(())
    }

    fn update_weekly(&self, user_id: &str, event: &ProgressEvent) -> Result<()> {
        // 주간 챌린지는 이동 이벤트만 누적한다
        let ProgressEvent::MovementCompleted { distance_m, .. } = event else {
            return Ok(());
        };

        let week_key = clock::iso_week_key(self.today);
        let distance = *distance_m;
        self.store.update_weekly(user_id, &week_key, &mut |weekly| {
            weekly.record_movement(distance);
        })?;
        Ok(())
    }

    fn update_achievements(
        &self,
        user_id: &str,
        event: &ProgressEvent,
        report: &mut ProgressReport,
    ) -> Result<()> {
        // 이동 이벤트는 스트라이드 상태(수명 집계의 원본)부터 반영한다
        let stride = if let ProgressEvent::MovementCompleted { distance_m, .. } = event {
            let today = self.today;
            let distance = *distance_m;
            self.store.update_stride(user_id, &mut |state| {
                *state = StrideMachine::evaluate_day(state, today);
                StrideMachine::record_distance(state, distance);
            })?
        } else {
            self.store.load_stride(user_id)?.unwrap_or_default()
        };

        // 이벤트별 원본 집계 증가
        let sources = self.store.update_sources(user_id, &mut |tally| {
            match event {
                ProgressEvent::MovementCompleted { multi_modal, .. } => {
                    if *multi_modal {
                        tally.multi_modal_moves += 1;
                    }
                }
                ProgressEvent::QuestCompleted => tally.quests_completed += 1,
                ProgressEvent::GamePlayed => tally.games_played += 1,
                ProgressEvent::CourseCompleted => tally.courses_completed += 1,
                ProgressEvent::AllClearAchieved => tally.all_clears += 1,
            }
            // 수명 거리/최장 스트릭의 원본은 스트라이드 상태다
            tally.lifetime_distance_m = stride.lifetime_distance_m;
            tally.longest_streak = stride.longest_streak;
        })?;

        report.completed_achievements = self.recompute_achievements(user_id, &sources)?;
        Ok(())
    }

    /// 카탈로그 전체를 원본 집계 스냅샷으로 재계산
    fn recompute_achievements(
        &self,
        user_id: &str,
        sources: &ProgressSources,
    ) -> Result<Vec<String>> {
        let now = self.now;
        let mut completed = Vec::new();
        for def in achievement_catalog() {
            let progress = recompute_progress(def, sources);
            let mut newly_completed = false;
            self.store.update_achievement(user_id, &def.code, &mut |state| {
                newly_completed = state.apply_recomputed(progress, def.target, now);
            })?;
            if newly_completed {
                completed.push(def.code.clone());
            }
        }
        Ok(completed)
    }
}
