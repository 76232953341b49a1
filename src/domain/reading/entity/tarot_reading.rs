use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 카드 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// 정방향
    Upright,
    /// 역방향
    Reversed,
}

/// 리딩에서 뽑힌 카드 한 장
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawnCard {
    pub card_id: String,
    pub orientation: Orientation,
}

/// 뽑힌 카드 목록 (JSON 컬럼)
///
/// 완료된 리딩은 항상 1장 이상의 카드를 가진다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, FromJsonQueryResult)]
pub struct DrawnCards(pub Vec<DrawnCard>);

/// 사용자별 타로 리딩 기록
///
/// 리딩 플로우(외부 시스템)가 리딩 완료 시점에 생성하며,
/// 분석 파이프라인은 읽기 전용으로만 소비한다.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tarot_readings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub reading_id: i64,
    pub user_id: i64,
    pub question: String,
    pub spread_type: String,
    #[sea_orm(column_type = "Json")]
    pub cards: DrawnCards,
    /// 만족도 (1~5), 미기록 가능
    pub satisfaction: Option<i32>,
    pub mood: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub interpretation: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_should_serialize_lowercase() {
        // Arrange & Act
        let upright = serde_json::to_string(&Orientation::Upright).unwrap();
        let reversed = serde_json::to_string(&Orientation::Reversed).unwrap();

        // Assert
        assert_eq!(upright, "\"upright\"");
        assert_eq!(reversed, "\"reversed\"");
    }

    #[test]
    fn drawn_card_should_deserialize_camel_case() {
        // Arrange
        let json = r#"{"cardId": "the-fool", "orientation": "reversed"}"#;

        // Act
        let card: DrawnCard = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(card.card_id, "the-fool");
        assert_eq!(card.orientation, Orientation::Reversed);
    }

    #[test]
    fn drawn_cards_should_round_trip_as_json_array() {
        // Arrange
        let cards = DrawnCards(vec![
            DrawnCard {
                card_id: "the-sun".to_string(),
                orientation: Orientation::Upright,
            },
            DrawnCard {
                card_id: "the-moon".to_string(),
                orientation: Orientation::Reversed,
            },
        ]);

        // Act
        let json = serde_json::to_string(&cards).unwrap();
        let parsed: DrawnCards = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(parsed, cards);
    }
}
