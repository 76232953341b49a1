//! 패턴 집계 속성 테스트
//!
//! 합성 기록 집합에 대한 집계 불변식을 검증합니다.
//! (빈도 보존, 상위 N 절단, 결정적 직렬화)

use chrono::{NaiveDate, NaiveDateTime};

use innerspell_server::domain::analytics::pattern::build_reading_pattern;
use innerspell_server::domain::reading::entity::tarot_reading::{
    DrawnCard, DrawnCards, Model, Orientation,
};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn single_card_reading(id: i64, card_id: &str, created_at: NaiveDateTime) -> Model {
    Model {
        reading_id: id,
        user_id: 1,
        question: format!("질문 {}", id),
        spread_type: "one-card".to_string(),
        cards: DrawnCards(vec![DrawnCard {
            card_id: card_id.to_string(),
            orientation: if id % 2 == 0 {
                Orientation::Upright
            } else {
                Orientation::Reversed
            },
        }]),
        satisfaction: None,
        mood: None,
        interpretation: "해석".to_string(),
        created_at,
    }
}

#[test]
fn card_counts_should_be_conserved() {
    // Arrange: 카드 1장짜리 기록 N개
    let records: Vec<Model> = (0..37)
        .map(|i| single_card_reading(i, &format!("card-{:02}", i % 7), at(1 + (i % 20) as u32, 3)))
        .collect();

    // Act
    let pattern = build_reading_pattern(&records);

    // Assert: 카드 수 합계 == 기록 수
    let total: usize = pattern.frequent_cards.iter().map(|c| c.count).sum();
    assert_eq!(total, records.len());
    assert_eq!(pattern.total_readings, records.len());
}

#[test]
fn orientation_split_should_match_per_card() {
    // Arrange: 같은 카드 — 짝수 id는 정방향, 홀수 id는 역방향
    let records: Vec<Model> = (0..9)
        .map(|i| single_card_reading(i, "the-tower", at(1 + i as u32, 3)))
        .collect();

    // Act
    let pattern = build_reading_pattern(&records);

    // Assert
    let entry = &pattern.frequent_cards[0];
    assert_eq!(entry.count, 9);
    assert_eq!(entry.upright_count, 5);
    assert_eq!(entry.reversed_count, 4);
    assert_eq!(entry.count, entry.upright_count + entry.reversed_count);
}

#[test]
fn frequent_cards_should_keep_exactly_top_twenty() {
    // Arrange: 서로 다른 빈도의 카드 30종 (card-n이 n+1회 등장)
    let mut records = Vec::new();
    let mut id = 0;
    for card in 0..30 {
        for _ in 0..=card {
            records.push(single_card_reading(
                id,
                &format!("card-{:02}", card),
                at(1 + (id % 25) as u32, 2),
            ));
            id += 1;
        }
    }

    // Act
    let pattern = build_reading_pattern(&records);

    // Assert: 빈도 내림차순 상위 20개만 남는다
    assert_eq!(pattern.frequent_cards.len(), 20);
    assert_eq!(pattern.frequent_cards[0].card_id, "card-29");
    assert_eq!(pattern.frequent_cards[0].count, 30);
    assert_eq!(pattern.frequent_cards[19].card_id, "card-10");
    assert_eq!(pattern.frequent_cards[19].count, 11);
    for window in pattern.frequent_cards.windows(2) {
        assert!(window[0].count >= window[1].count);
    }
}

#[test]
fn tied_counts_should_order_by_card_id() {
    // Arrange: 동일 빈도의 카드들
    let records = vec![
        single_card_reading(3, "zebra", at(3, 2)),
        single_card_reading(2, "apple", at(2, 2)),
        single_card_reading(1, "mango", at(1, 2)),
    ];

    // Act
    let pattern = build_reading_pattern(&records);

    // Assert: cardId 오름차순
    let ids: Vec<&str> = pattern
        .frequent_cards
        .iter()
        .map(|c| c.card_id.as_str())
        .collect();
    assert_eq!(ids, vec!["apple", "mango", "zebra"]);
}

#[test]
fn identical_input_should_serialize_identically() {
    // Arrange: 무드/만족도까지 채운 기록 집합
    let mut records: Vec<Model> = (0..25)
        .map(|i| single_card_reading(i, &format!("card-{:02}", i % 5), at(1 + (i % 10) as u32, (i % 24) as u32)))
        .collect();
    for (i, record) in records.iter_mut().enumerate() {
        record.satisfaction = Some((i % 5 + 1) as i32);
        record.mood = Some(if i % 2 == 0 { "평온" } else { "긴장" }.to_string());
        record.question = format!("{}번째 연애 질문이 좋아요", i);
    }

    // Act: 동일한 입력으로 두 번 집계
    let first = serde_json::to_string(&build_reading_pattern(&records)).unwrap();
    let second = serde_json::to_string(&build_reading_pattern(&records)).unwrap();

    // Assert: 바이트 단위로 동일
    assert_eq!(first, second);
}
