use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::BookDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: Uuid,
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: Uuid,
    title: String,
    author: String,
    isbn: String,
    category: String,
    is_available: bool,
    borrowed_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339::option")]
    borrowed_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            category: value.category,
            is_available: value.is_available,
            borrowed_by: value.borrowed_by,
            borrowed_at: value.borrowed_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<BookDto> for Presenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Vec<BookDto>> for Presenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json(input.into_iter().map(BookResponse::from).collect())
    }
}

/// Deleting answers with no body.
impl Exhaust<Uuid> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: Uuid) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

pub struct CreatedPresenter;

impl Exhaust<BookDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        CreatedResponse { id: input.id }
    }
}
