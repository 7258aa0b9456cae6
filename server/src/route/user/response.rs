use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::UserDto;
use kernel::prelude::entity::UserRole;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    name: String,
    email: String,
    role: UserRole,
    borrowed_books: Vec<Uuid>,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: match value.is_admin {
                true => UserRole::Admin,
                false => UserRole::User,
            },
            borrowed_books: value.borrowed_books,
        }
    }
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<UserDto> for Presenter {
    type To = UserResponse;
    fn emit(&self, input: UserDto) -> Self::To {
        UserResponse::from(input)
    }
}

impl Exhaust<Vec<UserDto>> for Presenter {
    type To = Json<Vec<UserResponse>>;
    fn emit(&self, input: Vec<UserDto>) -> Self::To {
        Json(input.into_iter().map(UserResponse::from).collect())
    }
}
