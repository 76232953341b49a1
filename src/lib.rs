pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::analytics::handler::reading_analytics_handler,
        domain::health::handler::health_check,
    ),
    components(
        schemas(
            domain::analytics::dto::PeriodSummary,
            domain::analytics::dto::ReadingPattern,
            domain::analytics::dto::CardFrequencyEntry,
            domain::analytics::dto::SpreadUsageEntry,
            domain::analytics::dto::QuestionCategoryEntry,
            domain::analytics::dto::SentimentCounts,
            domain::analytics::dto::HourlyActivityEntry,
            domain::analytics::dto::MoodCorrelationEntry,
            domain::analytics::dto::GrowthAnalysis,
            domain::analytics::dto::GrowthSection,
            domain::analytics::dto::RecommendationList,
            domain::analytics::dto::Recommendation,
            domain::analytics::dto::RecommendationKind,
            domain::analytics::dto::PeriodComparison,
            domain::analytics::categorize::QuestionCategory,
            domain::analytics::categorize::Sentiment,
            domain::health::dto::HealthStatus,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Analytics", description = "리딩 사용 패턴 분석 API"),
        (name = "Health", description = "서버 상태 API")
    )
)]
pub struct ApiDoc;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::handler::health_check))
        .route(
            "/api/reading/analytics",
            get(domain::analytics::handler::reading_analytics_handler),
        )
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
