// 인메모리 저장소 - 테스트/CLI용
use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::achievement::types::AchievementState;
use crate::challenge::WeeklyChallengeState;
use crate::mission::types::DailyMissionInstance;
use crate::models::event::ProgressSources;
use crate::store::{ProgressStore, StoreError, StoreResult};
use crate::stride::types::StrideState;

/// `RwLock<HashMap>` 기반 저장소
///
/// Each record family sits behind its own lock; an `update_*` closure runs
/// under the write lock, which is exactly the per-record atomic
/// read-modify-write the trait promises.
#[derive(Default)]
pub struct MemoryStore {
    stride: RwLock<HashMap<String, StrideState>>,
    missions: RwLock<HashMap<(String, NaiveDate), Vec<DailyMissionInstance>>>,
    weekly: RwLock<HashMap<(String, String), WeeklyChallengeState>>,
    achievements: RwLock<HashMap<(String, String), AchievementState>>,
    sources: RwLock<HashMap<String, ProgressSources>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Poisoned("memory store lock".to_string())
}

impl ProgressStore for MemoryStore {
    fn load_stride(&self, user_id: &str) -> StoreResult<Option<StrideState>> {
        let map = self.stride.read().map_err(poisoned)?;
        Ok(map.get(user_id).cloned())
    }

    fn update_stride(
        &self,
        user_id: &str,
        apply: &mut dyn FnMut(&mut StrideState),
    ) -> StoreResult<StrideState> {
        let mut map = self.stride.write().map_err(poisoned)?;
        let record = map.entry(user_id.to_string()).or_default();
        apply(record);
        Ok(record.clone())
    }

    fn load_daily_missions(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<Vec<DailyMissionInstance>>> {
        let map = self.missions.read().map_err(poisoned)?;
        Ok(map.get(&(user_id.to_string(), date)).cloned())
    }

    fn init_daily_missions(
        &self,
        user_id: &str,
        date: NaiveDate,
        missions: Vec<DailyMissionInstance>,
    ) -> StoreResult<Vec<DailyMissionInstance>> {
        let mut map = self.missions.write().map_err(poisoned)?;
        let record = map.entry((user_id.to_string(), date)).or_insert(missions);
        Ok(record.clone())
    }

    fn update_daily_missions(
        &self,
        user_id: &str,
        date: NaiveDate,
        apply: &mut dyn FnMut(&mut Vec<DailyMissionInstance>),
    ) -> StoreResult<Vec<DailyMissionInstance>> {
        let mut map = self.missions.write().map_err(poisoned)?;
        let record = map.get_mut(&(user_id.to_string(), date)).ok_or_else(|| {
            StoreError::RecordMissing { key: format!("missions/{}/{}", user_id, date) }
        })?;
        apply(record);
        Ok(record.clone())
    }

    fn load_weekly(
        &self,
        user_id: &str,
        week_key: &str,
    ) -> StoreResult<Option<WeeklyChallengeState>> {
        let map = self.weekly.read().map_err(poisoned)?;
        Ok(map.get(&(user_id.to_string(), week_key.to_string())).cloned())
    }

    fn update_weekly(
        &self,
        user_id: &str,
        week_key: &str,
        apply: &mut dyn FnMut(&mut WeeklyChallengeState),
    ) -> StoreResult<WeeklyChallengeState> {
        let mut map = self.weekly.write().map_err(poisoned)?;
        let record = map
            .entry((user_id.to_string(), week_key.to_string()))
            .or_insert_with(|| WeeklyChallengeState::new(week_key));
        apply(record);
        Ok(record.clone())
    }

    fn load_achievements(&self, user_id: &str) -> StoreResult<Vec<AchievementState>> {
        let map = self.achievements.read().map_err(poisoned)?;
        Ok(map
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|(_, state)| state.clone())
            .collect())
    }

    fn update_achievement(
        &self,
        user_id: &str,
        code: &str,
        apply: &mut dyn FnMut(&mut AchievementState),
    ) -> StoreResult<AchievementState> {
        let mut map = self.achievements.write().map_err(poisoned)?;
        let record = map
            .entry((user_id.to_string(), code.to_string()))
            .or_insert_with(|| AchievementState::new(code));
        apply(record);
        Ok(record.clone())
    }

    fn load_sources(&self, user_id: &str) -> StoreResult<ProgressSources> {
        let map = self.sources.read().map_err(poisoned)?;
        Ok(map.get(user_id).copied().unwrap_or_default())
    }

    fn update_sources(
        &self,
        user_id: &str,
        apply: &mut dyn FnMut(&mut ProgressSources),
    ) -> StoreResult<ProgressSources> {
        let mut map = self.sources.write().map_err(poisoned)?;
        let record = map.entry(user_id.to_string()).or_default();
        apply(record);
        Ok(*record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_initializes_missing_records() {
        let store = MemoryStore::new();

        let stride = store.update_stride("user-001", &mut |s| s.streak_days = 3).unwrap();
        assert_eq!(stride.streak_days, 3);
        assert_eq!(store.load_stride("user-001").unwrap().unwrap().streak_days, 3);

        // 다른 유저는 독립
        assert!(store.load_stride("user-002").unwrap().is_none());
    }

    #[test]
    fn test_init_daily_missions_first_writer_wins() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let first = crate::mission::generate_daily_missions("user-001", date);
        let first_ids: Vec<String> = first.iter().map(|m| m.id.clone()).collect();

        let stored = store.init_daily_missions("user-001", date, first).unwrap();
        let stored_ids: Vec<String> = stored.iter().map(|m| m.id.clone()).collect();
        assert_eq!(stored_ids, first_ids);

        // 두 번째 init은 기존 레코드를 그대로 돌려준다
        let second = crate::mission::generate_daily_missions("user-001", date);
        let stored_again = store.init_daily_missions("user-001", date, second).unwrap();
        let again_ids: Vec<String> = stored_again.iter().map(|m| m.id.clone()).collect();
        assert_eq!(again_ids, first_ids);
    }

    #[test]
    fn test_update_missing_missions_is_error() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let result = store.update_daily_missions("user-001", date, &mut |_| {});
        assert!(matches!(result, Err(StoreError::RecordMissing { .. })));
    }

    #[test]
    fn test_achievements_scoped_per_user() {
        let store = MemoryStore::new();
        store.update_achievement("user-001", "quest_10", &mut |a| a.progress = 5).unwrap();
        store.update_achievement("user-002", "quest_10", &mut |a| a.progress = 9).unwrap();

        let mine = store.load_achievements("user-001").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].progress, 5);
    }
}
