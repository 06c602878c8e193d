use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{extractor::path::ApiPath, state::ApiState, utils::json_content_type};

use super::BookError;

#[derive(Debug)]
pub struct DeleteBookResponse;

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::NO_CONTENT, json_content_type()).into_response()
    }
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "No book with this id"),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<DeleteBookResponse, BookError> {
    state
        .store()
        .delete(id)
        .await
        .map_err(|err| super::book_error(&state, err))?;

    tracing::info!("Book deleted");

    Ok(DeleteBookResponse)
}
