use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::categorize::{QuestionCategory, Sentiment};

/// 분석 요청 쿼리 파라미터
///
/// 값이 없거나 알 수 없는 값이면 기본값(overview / all)으로 동작한다.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQueryParams {
    /// 분석 유형 (overview|patterns|growth|recommendations|comparison)
    #[serde(rename = "type")]
    #[param(example = "patterns")]
    pub analysis_type: Option<String>,
    /// 조회 기간 (week|month|3months|year|all)
    #[param(example = "month")]
    pub period: Option<String>,
}

/// 분석 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsType {
    Overview,
    Patterns,
    Growth,
    Recommendations,
    Comparison,
}

impl AnalyticsType {
    /// 쿼리 파라미터 해석
    ///
    /// 알 수 없는 값은 에러 대신 `Overview`로 동작한다.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("patterns") => AnalyticsType::Patterns,
            Some("growth") => AnalyticsType::Growth,
            Some("recommendations") => AnalyticsType::Recommendations,
            Some("comparison") => AnalyticsType::Comparison,
            _ => AnalyticsType::Overview,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsType::Overview => "overview",
            AnalyticsType::Patterns => "patterns",
            AnalyticsType::Growth => "growth",
            AnalyticsType::Recommendations => "recommendations",
            AnalyticsType::Comparison => "comparison",
        }
    }
}

impl std::fmt::Display for AnalyticsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 조회 기간
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    ThreeMonths,
    Year,
    All,
}

impl Period {
    /// 쿼리 파라미터 해석
    ///
    /// 알 수 없는 값은 에러 대신 `All`로 동작한다.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            Some("3months") => Period::ThreeMonths,
            Some("year") => Period::Year,
            _ => Period::All,
        }
    }

    /// 기간 시작 시각 계산 (기준 시각에서의 고정 오프셋)
    pub fn start_date(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Period::Week => now - Duration::days(7),
            Period::Month => now - Duration::days(30),
            Period::ThreeMonths => now - Duration::days(90),
            Period::Year => now - Duration::days(365),
            Period::All => chrono::DateTime::UNIX_EPOCH.naive_utc(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::ThreeMonths => "3months",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 기간 요약 (overview 응답이자 comparison의 구성 요소)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// 기간 내 전체 리딩 수
    pub total_readings: usize,
    /// 평균 만족도 (기록이 하나도 없으면 생략)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_satisfaction: Option<f64>,
    /// 기간 내 서로 다른 카드 수
    pub unique_cards: usize,
    /// 주요 테마 (빈도 상위 3개)
    pub dominant_themes: Vec<QuestionCategory>,
}

/// 패턴 분석 결과 (patterns 응답)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPattern {
    pub total_readings: usize,
    /// 자주 등장한 카드 (상위 20개)
    pub frequent_cards: Vec<CardFrequencyEntry>,
    pub spread_usage: Vec<SpreadUsageEntry>,
    pub question_categories: Vec<QuestionCategoryEntry>,
    /// 시간대별 리딩 수 (등장한 시간대만, KST 기준)
    pub hourly_activity: Vec<HourlyActivityEntry>,
    pub mood_correlations: Vec<MoodCorrelationEntry>,
}

/// 카드 빈도 항목
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardFrequencyEntry {
    pub card_id: String,
    pub count: usize,
    pub upright_count: usize,
    pub reversed_count: usize,
    /// 이 카드가 등장한 질문들
    pub contexts: Vec<String>,
    /// KST 기준 날짜 (YYYY-MM-DD)
    pub last_appeared: String,
}

/// 스프레드 사용 항목
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpreadUsageEntry {
    pub spread_type: String,
    pub count: usize,
    /// 만족도 기록이 하나도 없으면 생략 (0으로 메우지 않음)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_satisfaction: Option<f64>,
}

/// 감정별 집계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// 질문 카테고리 항목
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCategoryEntry {
    pub category: QuestionCategory,
    pub count: usize,
    /// 질문에서 추출한 키워드 합집합 (정렬됨)
    pub keywords: Vec<String>,
    pub sentiment_counts: SentimentCounts,
    pub dominant_sentiment: Sentiment,
}

/// 시간대별 리딩 수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyActivityEntry {
    /// KST 기준 시간대 (0..=23)
    pub hour: u32,
    pub count: usize,
}

/// 무드별 상관 항목
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodCorrelationEntry {
    pub mood: String,
    pub count: usize,
    /// 해당 무드에서 등장한 카드 (정렬됨)
    pub cards: Vec<String>,
    /// 해석 요약 (50자 절단)
    pub outcomes: Vec<String>,
}

/// 성장 분석 하위 섹션 상태
///
/// 미구현 섹션은 빈 데이터 대신 명시적인 상태로 내려보내
/// "이력이 없음"과 구분한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GrowthSection {
    NotImplemented,
}

/// 성장 분석 결과 (growth 응답)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthAnalysis {
    pub total_readings: usize,
    /// 첫 리딩 날짜 (KST, 이력이 없으면 생략)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_reading_at: Option<String>,
    /// 마지막 리딩 날짜 (KST, 이력이 없으면 생략)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reading_at: Option<String>,
    pub timeline: GrowthSection,
    pub skill_progression: GrowthSection,
    pub insight_evolution: GrowthSection,
    pub thematic_journey: GrowthSection,
    pub milestones: GrowthSection,
    pub growth_projections: GrowthSection,
}

/// 추천 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationKind {
    /// 덜 쓰인 카드 탐색
    CardDiversity,
    /// 새로운 시간대 시도
    NewTime,
}

/// 추천 항목
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
    pub suggestions: Vec<String>,
    /// 고정 가중치 (통계적 신뢰도가 아님)
    pub confidence: f64,
}

/// 추천 목록 (recommendations 응답)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationList {
    pub recommendations: Vec<Recommendation>,
}

/// 월간 비교 결과 (comparison 응답)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub current: PeriodSummary,
    pub previous: PeriodSummary,
    pub reading_count_change: i64,
    /// 두 기간 모두 만족도 기록이 있을 때만 포함
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction_change: Option<f64>,
    pub unique_cards_change: i64,
    /// 이번 달에 새로 등장한 테마
    pub new_themes: Vec<QuestionCategory>,
}

/// 유형별 분석 응답
///
/// 응답 본문 형태는 요청한 분석 유형에 따라 달라진다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyticsResult {
    Overview(PeriodSummary),
    Patterns(ReadingPattern),
    Growth(GrowthAnalysis),
    Recommendations(RecommendationList),
    Comparison(PeriodComparison),
}
