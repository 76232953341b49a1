//! 성장 분석
//!
//! 전체 이력을 대상으로 한 요약과, 아직 구현되지 않은 하위 분석 섹션의
//! 명시적 상태를 함께 내려보낸다.

use super::dto::{GrowthAnalysis, GrowthSection};
use super::kst::kst_date;
use crate::domain::reading::entity::tarot_reading;

/// 전체 이력에서 성장 분석 생성
///
/// `records`는 최신순이므로 첫 리딩은 마지막 원소, 마지막 리딩은 첫 원소다.
/// 타임라인/스킬/인사이트 등 하위 분석은 미구현 상태를 그대로 노출한다.
pub fn build_growth_analysis(records: &[tarot_reading::Model]) -> GrowthAnalysis {
    GrowthAnalysis {
        total_readings: records.len(),
        first_reading_at: records.last().map(|r| kst_date(r.created_at)),
        last_reading_at: records.first().map(|r| kst_date(r.created_at)),
        timeline: GrowthSection::NotImplemented,
        skill_progression: GrowthSection::NotImplemented,
        insight_evolution: GrowthSection::NotImplemented,
        thematic_journey: GrowthSection::NotImplemented,
        milestones: GrowthSection::NotImplemented,
        growth_projections: GrowthSection::NotImplemented,
    }
}
