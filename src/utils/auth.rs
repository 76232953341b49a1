use axum::{async_trait, extract::FromRequestParts, http::header::COOKIE, http::request::Parts};

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_session_token, Claims};

/// 세션 쿠키 이름
pub const SESSION_COOKIE: &str = "session";

/// 인증된 사용자 정보를 담는 Extractor
///
/// `session` 쿠키의 토큰을 검증해 인증 주체를 추출한다.
/// 이후 모든 조회는 여기서 꺼낸 사용자 ID를 명시적으로 전달받아 수행된다.
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// 세션 Claims에서 사용자 ID를 추출합니다.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("유효하지 않은 사용자 ID입니다."))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. 쿠키에서 세션 토큰 추출
        let token = extract_session_from_cookie(parts)?;

        // 2. 토큰 검증 및 디코딩
        let claims = decode_session_token(&token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

/// 쿠키 헤더에서 session 값 추출
///
/// 쿠키 자체가 없으면 인증 요구 메시지를 그대로 내려준다.
fn extract_session_from_cookie(parts: &Parts) -> Result<String, AppError> {
    let cookie_header = parts
        .headers
        .get(COOKIE)
        .ok_or_else(|| AppError::unauthorized("인증이 필요합니다"))?;

    let cookie_str = cookie_header
        .to_str()
        .map_err(|_| AppError::unauthorized("잘못된 쿠키 형식입니다."))?;

    // 쿠키 파싱: "name1=value1; name2=value2" 형식
    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", SESSION_COOKIE)) {
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
    }

    Err(AppError::unauthorized("인증이 필요합니다"))
}
