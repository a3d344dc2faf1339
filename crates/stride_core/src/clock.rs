//! 서비스 기준 시간대(KST) 날짜 계산
//!
//! All day boundaries in the engine (stride evaluation, daily missions,
//! "today" scoping, ISO week keys) are derived from a single canonical
//! timezone so that components never disagree about what day it is.
//! Callers inject the reference timestamp; nothing in this crate reads the
//! wall clock.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc};

/// KST는 UTC+9 고정 (DST 없음)
const KST_OFFSET_SECONDS: i32 = 9 * 3600;

fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECONDS).expect("KST offset is valid")
}

/// UTC 타임스탬프의 KST 달력 날짜
pub fn service_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&kst()).date_naive()
}

/// UTC 타임스탬프의 KST 시각 (0..=23), 시간대 보상 밴드 조회용
pub fn service_hour(ts: DateTime<Utc>) -> u32 {
    ts.with_timezone(&kst()).hour()
}

/// `from`에서 `to`까지의 달력 일수 차이 (같은 날 = 0)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// ISO 주차 키, 예: "2026-W32"
pub fn iso_week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}
