//! 일일 미션 템플릿 풀 로드

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::mission::types::{MissionTemplate, MissionType};

/// 미션 템플릿 풀 YAML 데이터 (컴파일 타임 임베딩)
pub const MISSION_TEMPLATES_YAML: &str =
    include_str!("../../../../data/catalog/mission_templates.yaml");

#[derive(Debug, Deserialize)]
struct TemplateFile {
    templates: Vec<MissionTemplate>,
}

static MISSION_POOL: OnceLock<Vec<MissionTemplate>> = OnceLock::new();

/// 미션 템플릿 풀 로드
///
/// # Panics
/// 임베딩된 YAML이 잘못되었거나 풀 구성이 불완전하면 panic.
pub fn mission_pool() -> &'static [MissionTemplate] {
    MISSION_POOL.get_or_init(|| {
        let file: TemplateFile = serde_yaml::from_str(MISSION_TEMPLATES_YAML)
            .expect("embedded mission_templates.yaml must parse");
        let templates = file.templates;

        let mut ids = HashSet::new();
        let mut types: HashSet<MissionType> = HashSet::new();
        for template in &templates {
            assert!(ids.insert(template.id.clone()), "duplicate template id: {}", template.id);
            assert!(template.target > 0, "template {} target must be positive", template.id);
            types.insert(template.mission_type);
        }
        // 하루 3개를 서로 다른 타입으로 뽑을 수 있어야 한다
        assert!(types.len() >= 3, "mission pool needs at least 3 distinct types");

        templates
    })
}
