use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use super::dto::{AnalyticsQueryParams, AnalyticsResult, AnalyticsType, Period};
use super::service::AnalyticsService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;

/// 리딩 사용 패턴 분석 API
///
/// 세션 쿠키로 인증된 사용자의 리딩 기록을 유형/기간별로 집계합니다.
/// 알 수 없는 `type`/`period` 값은 각각 overview/all로 동작합니다.
#[utoipa::path(
    get,
    path = "/api/reading/analytics",
    params(AnalyticsQueryParams),
    responses(
        (status = 200, description = "유형별 분석 결과 (본문 형태는 type에 따라 다름)"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 500, description = "분석 생성 실패", body = ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn reading_analytics_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<AnalyticsQueryParams>,
) -> Result<Json<AnalyticsResult>, AppError> {
    let user_id = user.user_id()?;

    let analytics_type = AnalyticsType::from_param(params.analysis_type.as_deref());
    let period = Period::from_param(params.period.as_deref());

    // 기간 계산의 기준 시각은 여기서 한 번만 읽어 아래로 전달한다
    let now = Utc::now().naive_utc();

    info!(
        user_id = user_id,
        analytics_type = %analytics_type,
        period = %period,
        "리딩 분석 요청"
    );

    let result = AnalyticsService::generate(state, user_id, analytics_type, period, now).await?;

    Ok(Json(result))
}
