use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    extractor::json::ApiJson,
    state::ApiState,
    types::book::{Book, BookPayload},
};

#[derive(Debug)]
pub struct CreateBookResponse(pub Book);

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Stores a new book under the next free id. Any `id` in the body is ignored.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "The stored book with its assigned id", body = Book),
        (status = 400, description = "Malformed body"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_book(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> CreateBookResponse {
    let book = state.store().create(payload).await;

    tracing::info!(id = book.id, "Book created");

    CreateBookResponse(book)
}
