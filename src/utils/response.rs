use serde::Serialize;
use utoipa::ToSchema;

/// 에러 응답 구조체
///
/// 형식:
/// ```json
/// { "error": "인증이 필요합니다" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// 에러 메시지
    #[schema(example = "인증이 필요합니다")]
    pub error: String,
}

impl ErrorResponse {
    /// 에러 응답 생성
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
