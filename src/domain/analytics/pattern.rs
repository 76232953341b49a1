//! 리딩 패턴 집계
//!
//! 조회된 기록 집합(최신순)을 한 번 순회하며 카드/스프레드/카테고리/
//! 시간대/무드 히스토그램을 누적한다. 동일 입력에 대해 항상 동일한
//! JSON이 나오도록 모든 정렬에 결정적 2차 키를 사용한다.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;

use super::categorize::{
    analyze_sentiment, categorize_question, extract_keywords, QuestionCategory, Sentiment,
};
use super::dto::{
    CardFrequencyEntry, HourlyActivityEntry, MoodCorrelationEntry, PeriodSummary,
    QuestionCategoryEntry, ReadingPattern, SentimentCounts, SpreadUsageEntry,
};
use super::kst::{kst_date, kst_hour};
use crate::domain::reading::entity::tarot_reading;
use crate::domain::reading::entity::tarot_reading::Orientation;

/// 카드 빈도 목록 상한
const FREQUENT_CARDS_LIMIT: usize = 20;
/// 무드 항목의 해석 요약 글자 수
const OUTCOME_TRUNCATE_CHARS: usize = 50;
/// 기간 요약의 주요 테마 수
const DOMINANT_THEME_LIMIT: usize = 3;

struct CardAccumulator {
    count: usize,
    upright_count: usize,
    reversed_count: usize,
    contexts: Vec<String>,
    last_appeared: NaiveDateTime,
}

#[derive(Default)]
struct SpreadAccumulator {
    count: usize,
    satisfactions: Vec<i32>,
}

#[derive(Default)]
struct CategoryAccumulator {
    count: usize,
    keywords: BTreeSet<String>,
    sentiment_counts: SentimentCounts,
}

#[derive(Default)]
struct MoodAccumulator {
    count: usize,
    cards: BTreeSet<String>,
    outcomes: Vec<String>,
}

/// 기록 집합에서 패턴 집계 생성
///
/// `records`는 저장소 계약대로 `created_at` 내림차순이어야 한다.
pub fn build_reading_pattern(records: &[tarot_reading::Model]) -> ReadingPattern {
    let mut cards: BTreeMap<String, CardAccumulator> = BTreeMap::new();
    let mut spreads: BTreeMap<String, SpreadAccumulator> = BTreeMap::new();
    let mut categories: BTreeMap<QuestionCategory, CategoryAccumulator> = BTreeMap::new();
    let mut hours = [0usize; 24];
    let mut moods: BTreeMap<String, MoodAccumulator> = BTreeMap::new();

    for record in records {
        // 1. 카드 빈도
        for card in &record.cards.0 {
            let entry = cards
                .entry(card.card_id.clone())
                .or_insert_with(|| CardAccumulator {
                    count: 0,
                    upright_count: 0,
                    reversed_count: 0,
                    contexts: Vec::new(),
                    last_appeared: record.created_at,
                });
            entry.count += 1;
            match card.orientation {
                Orientation::Upright => entry.upright_count += 1,
                Orientation::Reversed => entry.reversed_count += 1,
            }
            entry.contexts.push(record.question.clone());
            // 순회 중 마지막으로 본 기록의 시각으로 덮어쓴다
            entry.last_appeared = record.created_at;
        }

        // 2. 스프레드 사용
        let spread = spreads.entry(record.spread_type.clone()).or_default();
        spread.count += 1;
        if let Some(satisfaction) = record.satisfaction {
            spread.satisfactions.push(satisfaction);
        }

        // 3. 질문 카테고리
        let category = categories
            .entry(categorize_question(&record.question))
            .or_default();
        category.count += 1;
        match analyze_sentiment(&record.question) {
            Sentiment::Positive => category.sentiment_counts.positive += 1,
            Sentiment::Neutral => category.sentiment_counts.neutral += 1,
            Sentiment::Negative => category.sentiment_counts.negative += 1,
        }
        category.keywords.extend(extract_keywords(&record.question));

        // 4. 시간대 (KST)
        hours[kst_hour(record.created_at) as usize] += 1;

        // 5. 무드
        if let Some(mood) = &record.mood {
            let entry = moods.entry(mood.clone()).or_default();
            entry.count += 1;
            entry
                .cards
                .extend(record.cards.0.iter().map(|c| c.card_id.clone()));
            entry
                .outcomes
                .push(truncate_chars(&record.interpretation, OUTCOME_TRUNCATE_CHARS));
        }
    }

    // 카드: 빈도 내림차순, 동률은 cardId 오름차순, 상위 20개
    let mut frequent_cards: Vec<CardFrequencyEntry> = cards
        .into_iter()
        .map(|(card_id, acc)| CardFrequencyEntry {
            card_id,
            count: acc.count,
            upright_count: acc.upright_count,
            reversed_count: acc.reversed_count,
            contexts: acc.contexts,
            last_appeared: kst_date(acc.last_appeared),
        })
        .collect();
    frequent_cards.sort_by(|a, b| b.count.cmp(&a.count).then(a.card_id.cmp(&b.card_id)));
    frequent_cards.truncate(FREQUENT_CARDS_LIMIT);

    // 스프레드: 빈도 내림차순, 동률은 이름 오름차순
    let mut spread_usage: Vec<SpreadUsageEntry> = spreads
        .into_iter()
        .map(|(spread_type, acc)| SpreadUsageEntry {
            spread_type,
            count: acc.count,
            average_satisfaction: mean(&acc.satisfactions),
        })
        .collect();
    spread_usage.sort_by(|a, b| b.count.cmp(&a.count).then(a.spread_type.cmp(&b.spread_type)));

    // 카테고리: 분류 우선순위 순서로 방출
    let question_categories: Vec<QuestionCategoryEntry> = QuestionCategory::ALL
        .iter()
        .filter_map(|category| {
            categories.get(category).map(|acc| QuestionCategoryEntry {
                category: *category,
                count: acc.count,
                keywords: acc.keywords.iter().cloned().collect(),
                sentiment_counts: acc.sentiment_counts,
                dominant_sentiment: dominant_sentiment(&acc.sentiment_counts),
            })
        })
        .collect();

    // 시간대: 등장한 시간대만 오름차순으로
    let hourly_activity: Vec<HourlyActivityEntry> = hours
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(hour, count)| HourlyActivityEntry {
            hour: hour as u32,
            count: *count,
        })
        .collect();

    // 무드: 이름 오름차순
    let mood_correlations: Vec<MoodCorrelationEntry> = moods
        .into_iter()
        .map(|(mood, acc)| MoodCorrelationEntry {
            mood,
            count: acc.count,
            cards: acc.cards.into_iter().collect(),
            outcomes: acc.outcomes,
        })
        .collect();

    ReadingPattern {
        total_readings: records.len(),
        frequent_cards,
        spread_usage,
        question_categories,
        hourly_activity,
        mood_correlations,
    }
}

/// 기간 요약 생성 (overview 및 comparison에서 사용)
pub fn summarize_period(records: &[tarot_reading::Model]) -> PeriodSummary {
    let satisfactions: Vec<i32> = records.iter().filter_map(|r| r.satisfaction).collect();

    let unique_cards: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.cards.0.iter().map(|c| c.card_id.as_str()))
        .collect();

    let mut theme_counts: BTreeMap<QuestionCategory, usize> = BTreeMap::new();
    for record in records {
        *theme_counts
            .entry(categorize_question(&record.question))
            .or_insert(0) += 1;
    }

    // 주요 테마: 빈도 내림차순, 동률은 분류 우선순위 순 (안정 정렬)
    let mut themes: Vec<(QuestionCategory, usize)> = QuestionCategory::ALL
        .iter()
        .filter_map(|c| theme_counts.get(c).map(|n| (*c, *n)))
        .collect();
    themes.sort_by(|a, b| b.1.cmp(&a.1));

    PeriodSummary {
        total_readings: records.len(),
        average_satisfaction: mean(&satisfactions),
        unique_cards: unique_cards.len(),
        dominant_themes: themes
            .into_iter()
            .take(DOMINANT_THEME_LIMIT)
            .map(|(category, _)| category)
            .collect(),
    }
}

/// 산술 평균, 값이 없으면 None (0이나 NaN으로 메우지 않음)
pub fn mean(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64)
}

/// 감정 집계에서 최빈 감정 선택
///
/// positive → neutral → negative 고정 순서로 비교하며,
/// 엄격히 더 큰 경우에만 교체되므로 동률은 앞선 항목이 유지된다.
fn dominant_sentiment(counts: &SentimentCounts) -> Sentiment {
    let ordered = [
        (Sentiment::Positive, counts.positive),
        (Sentiment::Neutral, counts.neutral),
        (Sentiment::Negative, counts.negative),
    ];
    let mut best = ordered[0];
    for candidate in &ordered[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// 글자 수 기준 절단
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::entity::tarot_reading::{DrawnCard, DrawnCards, Model};
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn reading(id: i64, cards: Vec<(&str, Orientation)>, created_at: NaiveDateTime) -> Model {
        Model {
            reading_id: id,
            user_id: 1,
            question: "오늘의 질문".to_string(),
            spread_type: "three-card".to_string(),
            cards: DrawnCards(
                cards
                    .into_iter()
                    .map(|(card_id, orientation)| DrawnCard {
                        card_id: card_id.to_string(),
                        orientation,
                    })
                    .collect(),
            ),
            satisfaction: None,
            mood: None,
            interpretation: "해석".to_string(),
            created_at,
        }
    }

    #[test]
    fn orientation_counts_should_sum_to_card_count() {
        // Arrange: 같은 카드가 정방향 2회, 역방향 1회
        let records = vec![
            reading(3, vec![("the-sun", Orientation::Upright)], at(3, 1)),
            reading(2, vec![("the-sun", Orientation::Reversed)], at(2, 1)),
            reading(1, vec![("the-sun", Orientation::Upright)], at(1, 1)),
        ];

        // Act
        let pattern = build_reading_pattern(&records);

        // Assert
        let entry = &pattern.frequent_cards[0];
        assert_eq!(entry.count, 3);
        assert_eq!(entry.upright_count, 2);
        assert_eq!(entry.reversed_count, 1);
        assert_eq!(entry.count, entry.upright_count + entry.reversed_count);
    }

    #[test]
    fn spread_average_satisfaction_should_be_arithmetic_mean() {
        // Arrange
        let mut records = vec![
            reading(3, vec![("a", Orientation::Upright)], at(3, 1)),
            reading(2, vec![("b", Orientation::Upright)], at(2, 1)),
            reading(1, vec![("c", Orientation::Upright)], at(1, 1)),
        ];
        records[0].satisfaction = Some(3);
        records[1].satisfaction = Some(4);
        records[2].satisfaction = Some(5);

        // Act
        let pattern = build_reading_pattern(&records);

        // Assert
        assert_eq!(pattern.spread_usage[0].average_satisfaction, Some(4.0));
    }

    #[test]
    fn spread_without_satisfaction_should_omit_average() {
        let records = vec![reading(1, vec![("a", Orientation::Upright)], at(1, 1))];

        let pattern = build_reading_pattern(&records);

        assert_eq!(pattern.spread_usage[0].average_satisfaction, None);
    }

    #[test]
    fn empty_records_should_produce_empty_histograms() {
        let pattern = build_reading_pattern(&[]);

        assert_eq!(pattern.total_readings, 0);
        assert!(pattern.frequent_cards.is_empty());
        assert!(pattern.spread_usage.is_empty());
        assert!(pattern.question_categories.is_empty());
        assert!(pattern.hourly_activity.is_empty());
        assert!(pattern.mood_correlations.is_empty());
    }

    #[test]
    fn hourly_activity_should_bucket_in_kst() {
        // UTC 16시 = KST 다음 날 1시
        let records = vec![reading(1, vec![("a", Orientation::Upright)], at(1, 16))];

        let pattern = build_reading_pattern(&records);

        assert_eq!(pattern.hourly_activity.len(), 1);
        assert_eq!(pattern.hourly_activity[0].hour, 1);
        assert_eq!(pattern.hourly_activity[0].count, 1);
    }

    #[test]
    fn mood_correlation_should_truncate_interpretation() {
        // Arrange
        let mut record = reading(1, vec![("a", Orientation::Upright)], at(1, 1));
        record.mood = Some("평온".to_string());
        record.interpretation = "가".repeat(80);

        // Act
        let pattern = build_reading_pattern(&[record]);

        // Assert
        let entry = &pattern.mood_correlations[0];
        assert_eq!(entry.mood, "평온");
        assert_eq!(entry.outcomes[0].chars().count(), 50);
    }

    #[test]
    fn dominant_sentiment_tie_should_keep_earlier_order() {
        // positive와 negative가 동수면 positive가 유지된다
        let counts = SentimentCounts {
            positive: 2,
            neutral: 0,
            negative: 2,
        };

        assert_eq!(dominant_sentiment(&counts), Sentiment::Positive);
    }

    #[test]
    fn mean_should_return_none_for_empty_slice() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[3, 4, 5]), Some(4.0));
    }

    #[test]
    fn summarize_period_should_count_unique_cards() {
        let records = vec![
            reading(
                2,
                vec![("a", Orientation::Upright), ("b", Orientation::Reversed)],
                at(2, 1),
            ),
            reading(1, vec![("a", Orientation::Upright)], at(1, 1)),
        ];

        let summary = summarize_period(&records);

        assert_eq!(summary.total_readings, 2);
        assert_eq!(summary.unique_cards, 2);
        assert_eq!(summary.average_satisfaction, None);
    }
}
