use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static REQUEST_ID: String;
}

/// Tags every request with an `x-request-id` (keeping one supplied by the
/// caller), echoes it on the response, and logs start and completion.
pub async fn logging_middleware(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = match request.headers().get(REQUEST_ID_HEADER) {
        Some(existing) => existing.clone(),
        None => {
            let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            request.headers_mut().insert(REQUEST_ID_HEADER, generated.clone());
            generated
        }
    };
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    tracing::info!(
        request_id = ?request_id,
        method = %method,
        uri = %uri,
        version = ?version,
        "Request started"
    );

    let scoped_id = String::from_utf8_lossy(request_id.as_bytes()).into_owned();
    let mut response = REQUEST_ID.scope(scoped_id, next.run(request)).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        request_id = ?request_id,
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}

/// The id of the request being served, when called from inside
/// [`logging_middleware`].
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// The request id stamped by [`logging_middleware`], or `"-"` when absent.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
