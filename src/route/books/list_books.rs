use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{state::ApiState, types::book::Book};

#[derive(Debug)]
pub struct ListBooksResponse(pub Vec<Book>);

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Lists all books in insertion order.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, possibly none", body = [Book]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(State(state): State<ApiState>) -> ListBooksResponse {
    let books = state.store().list().await;

    tracing::debug!(count = books.len(), "Listed");

    ListBooksResponse(books)
}
