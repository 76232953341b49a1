use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, Instrument};
use uuid::Uuid;

/// 요청 ID 헤더 이름
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 요청 컨텍스트에 저장되는 요청 ID
#[derive(Clone)]
#[allow(dead_code)]
pub struct RequestId(pub String);

/// 모든 요청에 요청 ID를 부여하고 완료 로그를 남기는 미들웨어
///
/// 클라이언트가 `x-request-id` 헤더를 보내면 그대로 사용하고,
/// 없으면 새 UUID를 발급합니다. 응답 헤더에도 동일한 값을 돌려줍니다.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = std::time::Instant::now();

    async move {
        let mut response = next.run(request).await;

        info!(
            status = response.status().as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
