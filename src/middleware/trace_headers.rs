use axum::{extract::Request, http::Response, middleware::Next, response::IntoResponse};

/// Middlware to trace request and response headers.
pub async fn trace_headers(req: Request, next: Next) -> impl IntoResponse {
    tracing::trace!(method = %req.method(), uri = %req.uri(), headers = ?req.headers(), "Request headers");

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    tracing::trace!(status = %parts.status, headers = ?parts.headers, "Response headers");

    Response::from_parts(parts, body)
}
