use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;

/// 분석 처리 중 오류 발생 시 클라이언트에 내려가는 고정 메시지
///
/// 내부 상세는 로그로만 남기고 응답에는 노출하지 않는다.
pub const ANALYTICS_FAILURE_MESSAGE: &str = "분석 데이터를 생성하는 중 오류가 발생했습니다";

/// 애플리케이션 전역 에러 타입
#[derive(Debug)]
pub enum AppError {
    /// 세션 부재 또는 유효하지 않은 세션 (401)
    Unauthorized(String),
    /// 리딩 기록 저장소 조회 실패 (500, 상세 비노출)
    StoreQueryFailed(String),
    /// 그 외 내부 오류 (500, 상세 비노출)
    InternalError(String),
}

impl AppError {
    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::StoreQueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에 노출할 메시지 반환
    ///
    /// 500 계열은 항상 고정 메시지로 내려가고, 실제 원인은 로그에만 남는다.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::StoreQueryFailed(_) | AppError::InternalError(_) => {
                ANALYTICS_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// 로그에 남길 내부 상세 반환
    fn detail(&self) -> &str {
        match self {
            AppError::Unauthorized(msg) => msg,
            AppError::StoreQueryFailed(msg) => msg,
            AppError::InternalError(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Unauthorized(_) => {
                error!(detail = self.detail(), "Unauthorized request");
            }
            AppError::StoreQueryFailed(_) => {
                error!(detail = self.detail(), "Reading store query failed");
            }
            AppError::InternalError(_) => {
                error!(detail = self.detail(), "Internal server error");
            }
        }

        let error_response = ErrorResponse::new(self.public_message());

        (status, Json(error_response)).into_response()
    }
}

/// 편의 함수들
impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn store_query_failed(msg: impl Into<String>) -> Self {
        AppError::StoreQueryFailed(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_should_expose_its_own_message() {
        let error = AppError::unauthorized("인증이 필요합니다");

        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.public_message(), "인증이 필요합니다");
    }

    #[test]
    fn store_failure_should_hide_internal_detail() {
        let error = AppError::store_query_failed("connection refused (db:3306)");

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), ANALYTICS_FAILURE_MESSAGE);
    }

    #[test]
    fn internal_error_should_hide_internal_detail() {
        let error = AppError::internal_error("serialization failed");

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), ANALYTICS_FAILURE_MESSAGE);
    }
}
