//! 업적 카탈로그 로드

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::achievement::types::AchievementDef;

/// 업적 카탈로그 YAML 데이터 (컴파일 타임 임베딩)
pub const ACHIEVEMENTS_YAML: &str = include_str!("../../../../data/catalog/achievements.yaml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    achievements: Vec<AchievementDef>,
}

static ACHIEVEMENT_CATALOG: OnceLock<Vec<AchievementDef>> = OnceLock::new();

/// 업적 카탈로그 로드
///
/// # Panics
/// 임베딩된 YAML이 잘못되었으면 panic.
pub fn achievement_catalog() -> &'static [AchievementDef] {
    ACHIEVEMENT_CATALOG.get_or_init(|| {
        let file: CatalogFile =
            serde_yaml::from_str(ACHIEVEMENTS_YAML).expect("embedded achievements.yaml must parse");
        let achievements = file.achievements;
        assert!(!achievements.is_empty(), "achievement catalog must not be empty");

        let mut codes = HashSet::new();
        for def in &achievements {
            assert!(codes.insert(def.code.clone()), "duplicate achievement code: {}", def.code);
            assert!(def.target > 0, "achievement {} target must be positive", def.code);
        }
        achievements
    })
}
