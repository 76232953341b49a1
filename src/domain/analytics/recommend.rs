//! 추천 생성
//!
//! 최근 기록만을 근거로 한 단순 휴리스틱 제안.
//! confidence 값은 통계적 측정치가 아닌 고정 가중치다.

use std::collections::BTreeMap;

use super::dto::{Recommendation, RecommendationKind, RecommendationList};
use super::kst::kst_hour;
use crate::domain::reading::entity::tarot_reading;

/// 추천 계산에 사용하는 최근 기록 수
pub const RECENT_WINDOW: u64 = 50;

/// 이 횟수 미만으로 쓰인 카드를 "덜 쓰인 카드"로 본다
const UNDERUSED_THRESHOLD: usize = 2;
/// 카드 제안 상한
const CARD_SUGGESTION_LIMIT: usize = 5;
/// 시간대 제안 상한
const HOUR_SUGGESTION_LIMIT: usize = 3;
/// 고정 가중치
const CARD_DIVERSITY_CONFIDENCE: f64 = 0.8;
const NEW_TIME_CONFIDENCE: f64 = 0.6;

/// 최근 기록에서 추천 목록 생성
///
/// 제안할 것이 없는 그룹은 목록에서 제외된다.
pub fn build_recommendations(records: &[tarot_reading::Model]) -> RecommendationList {
    let mut recommendations = Vec::new();

    // 1. 덜 쓰인 카드 제안 (cardId 오름차순, 최대 5개)
    let mut usage: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        for card in &record.cards.0 {
            *usage.entry(card.card_id.as_str()).or_insert(0) += 1;
        }
    }
    let underused: Vec<String> = usage
        .iter()
        .filter(|(_, count)| **count < UNDERUSED_THRESHOLD)
        .take(CARD_SUGGESTION_LIMIT)
        .map(|(card_id, _)| card_id.to_string())
        .collect();

    if !underused.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::CardDiversity,
            message: "최근에 자주 만나지 못한 카드로 새로운 관점을 탐색해 보세요.".to_string(),
            suggestions: underused,
            confidence: CARD_DIVERSITY_CONFIDENCE,
        });
    }

    // 2. 시도하지 않은 시간대 제안 (KST, 오름차순, 최대 3개)
    let mut hour_used = [false; 24];
    for record in records {
        hour_used[kst_hour(record.created_at) as usize] = true;
    }
    let unused_hours: Vec<String> = (0..24)
        .filter(|hour| !hour_used[*hour])
        .take(HOUR_SUGGESTION_LIMIT)
        .map(|hour| format!("{:02}시", hour))
        .collect();

    if !unused_hours.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::NewTime,
            message: "아직 리딩해 보지 않은 시간대에 카드를 펼쳐 보세요.".to_string(),
            suggestions: unused_hours,
            confidence: NEW_TIME_CONFIDENCE,
        });
    }

    RecommendationList { recommendations }
}
