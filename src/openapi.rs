use axum::Router;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    route::books,
    state::ApiState,
    types::book::{Book, BookPayload},
};

const OPENAPI_JSON: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Books API", description = "CRUD over an in-memory book collection"),
    paths(
        books::list_books::list_books,
        books::get_book::get_book,
        books::create_book::create_book,
        books::update_book::update_book,
        books::delete_book::delete_book,
    ),
    components(schemas(Book, BookPayload)),
    tags((name = "books", description = "Book management"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document and the three documentation UIs.
pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON, ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON).path("/rapidoc"))
}
