use std::sync::Arc;

use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::entity::tarot_reading;
use crate::utils::error::AppError;

/// 리딩 기록 저장소 인터페이스
///
/// 분석 파이프라인은 저장소를 읽기 전용으로만 소비합니다.
/// 테스트에서는 Mock 객체로 대체할 수 있습니다.
///
/// 모든 조회는 `created_at` 내림차순이며, 동일 시각은 `reading_id` 내림차순으로
/// 안정 정렬됩니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReadingStoreTrait: Send + Sync {
    /// 기간 내 리딩 기록 조회 (반개구간 `[start, end)`)
    async fn find_in_range(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<tarot_reading::Model>, AppError>;

    /// 최근 리딩 기록 조회 (최대 `limit`건)
    async fn find_recent(
        &self,
        user_id: i64,
        limit: u64,
    ) -> Result<Vec<tarot_reading::Model>, AppError>;

    /// 전체 이력 조회 (페이지네이션 없음)
    async fn find_all(&self, user_id: i64) -> Result<Vec<tarot_reading::Model>, AppError>;
}

/// Arc로 래핑된 ReadingStore (Clone 지원)
pub type ReadingStore = Arc<dyn ReadingStoreTrait>;

/// sea-orm 기반 저장소 구현체
#[derive(Clone)]
pub struct SeaOrmReadingStore {
    db: DatabaseConnection,
}

impl SeaOrmReadingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl ReadingStoreTrait for SeaOrmReadingStore {
    async fn find_in_range(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<tarot_reading::Model>, AppError> {
        tarot_reading::Entity::find()
            .filter(tarot_reading::Column::UserId.eq(user_id))
            .filter(tarot_reading::Column::CreatedAt.gte(start))
            .filter(tarot_reading::Column::CreatedAt.lt(end))
            .order_by_desc(tarot_reading::Column::CreatedAt)
            .order_by_desc(tarot_reading::Column::ReadingId)
            .all(&self.db)
            .await
            .map_err(|e| AppError::store_query_failed(e.to_string()))
    }

    async fn find_recent(
        &self,
        user_id: i64,
        limit: u64,
    ) -> Result<Vec<tarot_reading::Model>, AppError> {
        tarot_reading::Entity::find()
            .filter(tarot_reading::Column::UserId.eq(user_id))
            .order_by_desc(tarot_reading::Column::CreatedAt)
            .order_by_desc(tarot_reading::Column::ReadingId)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| AppError::store_query_failed(e.to_string()))
    }

    async fn find_all(&self, user_id: i64) -> Result<Vec<tarot_reading::Model>, AppError> {
        tarot_reading::Entity::find()
            .filter(tarot_reading::Column::UserId.eq(user_id))
            .order_by_desc(tarot_reading::Column::CreatedAt)
            .order_by_desc(tarot_reading::Column::ReadingId)
            .all(&self.db)
            .await
            .map_err(|e| AppError::store_query_failed(e.to_string()))
    }
}
