use axum::http::{header, HeaderName, HeaderValue};

/// `Content-Type: application/json`, for responses that carry no [`axum::Json`] body.
pub fn json_content_type() -> [(HeaderName, HeaderValue); 1] {
    [(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    )]
}
