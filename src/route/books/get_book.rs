use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{extractor::path::ApiPath, state::ApiState, types::book::Book};

use super::BookError;

#[derive(Debug)]
pub struct GetBookResponse(pub Book);

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "No book with this id"),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<GetBookResponse, BookError> {
    let book = state
        .store()
        .get(id)
        .await
        .map_err(|err| super::book_error(&state, err))?;

    Ok(GetBookResponse(book))
}
