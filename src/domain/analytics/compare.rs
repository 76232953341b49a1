//! 월간 비교
//!
//! 이번 달과 지난달(KST 달력 기준)의 요약을 비교한다.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::categorize::{categorize_question, QuestionCategory};
use super::dto::PeriodComparison;
use super::kst::{to_kst, to_utc};
use super::pattern::summarize_period;
use crate::domain::reading::entity::tarot_reading;

/// 비교 대상 두 기간의 조회 구간 (UTC, 반개구간)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindows {
    pub current_start: NaiveDateTime,
    pub current_end: NaiveDateTime,
    pub previous_start: NaiveDateTime,
    pub previous_end: NaiveDateTime,
}

/// 기준 시각에서 이번 달/지난달 조회 구간 계산
///
/// 달의 경계는 KST 달력 기준이며, 저장소 조회를 위해 UTC로 되돌려 준다.
/// 이번 달 구간은 달 시작부터 기준 시각까지다.
pub fn calendar_month_windows(now: NaiveDateTime) -> MonthWindows {
    let kst_now = to_kst(now);

    let current_month_start = first_day_of_month(kst_now.year(), kst_now.month());

    let (previous_year, previous_month) = if kst_now.month() == 1 {
        (kst_now.year() - 1, 12)
    } else {
        (kst_now.year(), kst_now.month() - 1)
    };
    let previous_month_start = first_day_of_month(previous_year, previous_month);

    MonthWindows {
        current_start: to_utc(current_month_start),
        current_end: now,
        previous_start: to_utc(previous_month_start),
        previous_end: to_utc(current_month_start),
    }
}

fn first_day_of_month(year: i32, month: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("first day of month is always valid")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
}

/// 두 기간의 기록으로 비교 결과 생성
pub fn build_period_comparison(
    current: &[tarot_reading::Model],
    previous: &[tarot_reading::Model],
) -> PeriodComparison {
    let current_summary = summarize_period(current);
    let previous_summary = summarize_period(previous);

    let satisfaction_change = match (
        current_summary.average_satisfaction,
        previous_summary.average_satisfaction,
    ) {
        (Some(current_avg), Some(previous_avg)) => Some(current_avg - previous_avg),
        _ => None,
    };

    // 새로 등장한 테마: 이번 달에 있고 지난달에 없는 카테고리 (우선순위 순)
    let current_themes: BTreeSet<QuestionCategory> = current
        .iter()
        .map(|r| categorize_question(&r.question))
        .collect();
    let previous_themes: BTreeSet<QuestionCategory> = previous
        .iter()
        .map(|r| categorize_question(&r.question))
        .collect();
    let new_themes: Vec<QuestionCategory> = QuestionCategory::ALL
        .iter()
        .filter(|c| current_themes.contains(c) && !previous_themes.contains(c))
        .copied()
        .collect();

    PeriodComparison {
        reading_count_change: current_summary.total_readings as i64
            - previous_summary.total_readings as i64,
        satisfaction_change,
        unique_cards_change: current_summary.unique_cards as i64
            - previous_summary.unique_cards as i64,
        new_themes,
        current: current_summary,
        previous: previous_summary,
    }
}
