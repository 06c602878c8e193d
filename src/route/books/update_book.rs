use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    extractor::{json::ApiJson, path::ApiPath},
    state::ApiState,
    types::book::{Book, BookPayload},
};

use super::BookError;

#[derive(Debug)]
pub struct UpdateBookResponse(pub Book);

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Replaces a book. The id always stays the one from the path.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "The updated book", body = Book),
        (status = 400, description = "Id is not an integer or malformed body"),
        (status = 404, description = "No book with this id"),
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> Result<UpdateBookResponse, BookError> {
    let book = state
        .store()
        .update(id, payload)
        .await
        .map_err(|err| super::book_error(&state, err))?;

    tracing::info!("Book updated");

    Ok(UpdateBookResponse(book))
}
