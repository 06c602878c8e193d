use axum::http::{HeaderMap, StatusCode};
use serde::Serialize;

use crate::{
    error::{ErrorVerbosityProvider, ResourceError, ResourceErrorProvider},
    state::ApiState,
    store::StoreError,
};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

pub type BookError = ResourceError<BookErrorType, BookErrorContext>;

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum BookErrorType {
    NotFound {
        #[serde(skip)]
        id: i64,
    },
}

#[derive(Debug, Serialize)]
pub struct BookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for BookErrorType {
    type Context = BookErrorContext;

    fn headers(&self) -> Option<HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            BookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            BookErrorType::NotFound { .. } => "Book not found",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            BookErrorType::NotFound { id } => BookErrorContext {
                reason: format!("Book with id {} not found", id),
            },
        }
    }
}

impl From<StoreError> for BookErrorType {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => BookErrorType::NotFound { id },
        }
    }
}

/// Maps a store failure to the response error, logging it on the way.
fn book_error(state: &ApiState, err: StoreError) -> BookError {
    tracing::warn!(%err, "Store rejected request");

    ResourceError::new(state.error_verbosity(), BookErrorType::from(err))
}
