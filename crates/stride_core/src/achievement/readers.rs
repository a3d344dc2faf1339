// 카테고리별 집계 리더
//
// 업적 진행도는 이벤트 스트림을 누적 신뢰하지 않고 매번 원본 집계에서
// 재계산한다. 중복 전달된 이벤트가 와도 같은 스냅샷이면 같은 진행도가
// 나오므로 멱등하고, 빠진 진행도는 다음 이벤트에서 저절로 복구된다.
// 카테고리가 늘어나면 이 테이블에 리더를 추가하면 된다.
use crate::achievement::types::{AchievementCategory, AchievementDef};
use crate::models::event::ProgressSources;

/// 집계 리더 - (업적 정의, 원본 집계) -> 재계산된 진행도
pub type AggregateReader = fn(&AchievementDef, &ProgressSources) -> i64;

const READERS: [(AchievementCategory, AggregateReader); 6] = [
    (AchievementCategory::Distance, read_distance),
    (AchievementCategory::Streak, read_streak),
    (AchievementCategory::Quest, read_quest),
    (AchievementCategory::Game, read_game),
    (AchievementCategory::Course, read_course),
    (AchievementCategory::Special, read_special),
];

/// 카테고리의 집계 리더 조회
pub fn reader_for(category: AchievementCategory) -> AggregateReader {
    READERS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, reader)| *reader)
        .expect("every achievement category has a reader")
}

/// 업적 하나의 진행도 재계산
pub fn recompute_progress(def: &AchievementDef, sources: &ProgressSources) -> i64 {
    reader_for(def.category)(def, sources)
}

fn read_distance(_def: &AchievementDef, sources: &ProgressSources) -> i64 {
    sources.lifetime_distance_m.floor() as i64
}

fn read_streak(_def: &AchievementDef, sources: &ProgressSources) -> i64 {
    sources.longest_streak as i64
}

fn read_quest(_def: &AchievementDef, sources: &ProgressSources) -> i64 {
    sources.quests_completed as i64
}

fn read_game(_def: &AchievementDef, sources: &ProgressSources) -> i64 {
    sources.games_played as i64
}

fn read_course(_def: &AchievementDef, sources: &ProgressSources) -> i64 {
    sources.courses_completed as i64
}

/// 일회성 업적은 코드별 전용 집계를 읽는다
fn read_special(def: &AchievementDef, sources: &ProgressSources) -> i64 {
    match def.code.as_str() {
        "first_multi" => sources.multi_modal_moves as i64,
        "all_clear_10" => sources.all_clears as i64,
        _ => {
            tracing::warn!(code = %def.code, "special achievement without a reader");
            0
        }
    }
}
