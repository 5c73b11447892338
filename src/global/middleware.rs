use axum::http::{HeaderName, HeaderValue};
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, Instrument};
use uuid::Uuid;

static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 요청 단위 추적 ID
///
/// 클라이언트가 보낸 `x-request-id`를 그대로 쓰고, 없으면 새로 발급합니다.
#[derive(Clone)]
#[allow(dead_code)]
pub struct RequestId(pub String);

/// 요청 ID 부여 + 요청 단위 span + 처리 시간 로깅
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(request_id.clone()));

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let span = tracing::info_span!("request", request_id = %request_id, method = %method, uri = %path);

    let started = std::time::Instant::now();
    let header_value = HeaderValue::from_str(&request_id)
        .unwrap_or_else(|_| HeaderValue::from_static("invalid"));

    async move {
        let mut response = next.run(request).await;

        info!(
            status = response.status().as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), header_value);
        response
    }
    .instrument(span)
    .await
}
