use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::{extract::Request as ExtractRequest, middleware::Next, response::Response};
use tower_http::trace::{HttpMakeClassifier, TraceLayer};
use tracing::Span;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `TraceLayer` whose spans carry the request id set by [`request_id_middleware`].
pub type HttpTraceLayer = TraceLayer<HttpMakeClassifier, fn(&Request<Body>) -> Span>;

/// Reuse the caller's `x-request-id` or mint a UUID v4, and echo it on the response.
///
/// Must sit outside [`http_trace_layer`] so the span sees the header.
pub async fn request_id_middleware(mut req: ExtractRequest, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let header_value = HeaderValue::from_str(&request_id).ok();

    if let Some(value) = header_value.clone() {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let mut response = next.run(req).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

pub fn http_trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http().make_span_with(make_request_span as fn(&Request<Body>) -> Span)
}

fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    )
}
