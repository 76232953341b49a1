use chrono::NaiveDateTime;
use tracing::info;

use super::compare::{build_period_comparison, calendar_month_windows};
use super::dto::{AnalyticsResult, AnalyticsType, Period};
use super::growth::build_growth_analysis;
use super::pattern::{build_reading_pattern, summarize_period};
use super::recommend::{build_recommendations, RECENT_WINDOW};
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct AnalyticsService;

impl AnalyticsService {
    /// 분석 유형별 디스패치
    ///
    /// 기준 시각 `now`는 핸들러에서 한 번만 읽어 명시적으로 전달받는다.
    /// 저장소 조회 실패는 그대로 전파되어 상위에서 일괄 처리된다.
    pub async fn generate(
        state: AppState,
        user_id: i64,
        analytics_type: AnalyticsType,
        period: Period,
        now: NaiveDateTime,
    ) -> Result<AnalyticsResult, AppError> {
        let result = match analytics_type {
            AnalyticsType::Overview => {
                let records = state
                    .store
                    .find_in_range(user_id, period.start_date(now), now)
                    .await?;
                info!(
                    user_id = user_id,
                    period = %period,
                    record_count = records.len(),
                    "기간 요약 생성"
                );
                AnalyticsResult::Overview(summarize_period(&records))
            }
            AnalyticsType::Patterns => {
                let records = state
                    .store
                    .find_in_range(user_id, period.start_date(now), now)
                    .await?;
                info!(
                    user_id = user_id,
                    period = %period,
                    record_count = records.len(),
                    "패턴 분석 생성"
                );
                AnalyticsResult::Patterns(build_reading_pattern(&records))
            }
            AnalyticsType::Growth => {
                // 전체 이력 대상 (기간 파라미터와 무관)
                let records = state.store.find_all(user_id).await?;
                info!(
                    user_id = user_id,
                    record_count = records.len(),
                    "성장 분석 생성"
                );
                AnalyticsResult::Growth(build_growth_analysis(&records))
            }
            AnalyticsType::Recommendations => {
                let records = state.store.find_recent(user_id, RECENT_WINDOW).await?;
                info!(
                    user_id = user_id,
                    record_count = records.len(),
                    "추천 생성"
                );
                AnalyticsResult::Recommendations(build_recommendations(&records))
            }
            AnalyticsType::Comparison => {
                let windows = calendar_month_windows(now);
                // 두 기간 조회를 동시에 수행, 하나라도 실패하면 전체 실패
                let (current, previous) = tokio::try_join!(
                    state
                        .store
                        .find_in_range(user_id, windows.current_start, windows.current_end),
                    state
                        .store
                        .find_in_range(user_id, windows.previous_start, windows.previous_end),
                )?;
                info!(
                    user_id = user_id,
                    current_count = current.len(),
                    previous_count = previous.len(),
                    "월간 비교 생성"
                );
                AnalyticsResult::Comparison(build_period_comparison(&current, &previous))
            }
        };

        Ok(result)
    }
}
