// 일일 미션 결정적 생성
//
// (유저, 날짜) 쌍이 항상 같은 미션 3개를 내놓아야 클라이언트 재조회와 서버
// 재생성이 어긋나지 않는다. 셔플은 콘텐츠 선택 장치일 뿐 보안 경계가
// 아니므로 암호 해시가 아닌 버전 안정적인 FxHasher를 정렬 키로 쓴다.
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use fxhash::FxHasher;

use crate::catalog::mission_pool;
use crate::mission::types::{DailyMissionInstance, MissionTemplate};

/// 하루에 배정되는 미션 수
pub const DAILY_MISSION_COUNT: usize = 3;

/// (유저, 날짜, 템플릿)의 안정 정렬 키
fn selection_key(user_id: &str, date: NaiveDate, template_id: &str) -> u64 {
    let mut hasher = FxHasher::default();
    user_id.hash(&mut hasher);
    date.hash(&mut hasher);
    template_id.hash(&mut hasher);
    hasher.finish()
}

/// (유저, 날짜)의 일일 미션 3개 생성
///
/// 풀 전체를 정렬 키 순으로 늘어놓고 앞에서부터 타입이 겹치지 않게 3개를
/// 고른다. 풀에 서로 다른 타입이 3종 미만이면 남은 슬롯은 아무 템플릿으로
/// 채운다. 영속화/멱등성(이미 생성된 날짜에 재생성하지 않기)은 진행도
/// 엔진의 put-if-absent가 보장한다.
pub fn generate_daily_missions(user_id: &str, date: NaiveDate) -> Vec<DailyMissionInstance> {
    let mut ordered: Vec<&'static MissionTemplate> = mission_pool().iter().collect();
    ordered.sort_by_key(|template| selection_key(user_id, date, &template.id));

    let mut selected: Vec<&MissionTemplate> = Vec::new();
    let mut seen_types = HashSet::new();
    for template in &ordered {
        if selected.len() == DAILY_MISSION_COUNT {
            break;
        }
        if seen_types.insert(template.mission_type) {
            selected.push(template);
        }
    }

    // 타입이 모자라면 남은 슬롯을 순서대로 채운다
    if selected.len() < DAILY_MISSION_COUNT {
        for template in &ordered {
            if selected.len() == DAILY_MISSION_COUNT {
                break;
            }
            if !selected.iter().any(|chosen| chosen.id == template.id) {
                selected.push(template);
            }
        }
    }

    selected
        .into_iter()
        .map(|template| DailyMissionInstance::from_template(template, date))
        .collect()
}
