use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{SessionDto, UserDto};

use crate::controller::Exhaust;
use crate::route::user::UserResponse;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    token: Uuid,
    user: UserResponse,
}

impl IntoResponse for SessionResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<SessionDto> for Presenter {
    type To = SessionResponse;
    fn emit(&self, input: SessionDto) -> Self::To {
        SessionResponse {
            token: input.token,
            user: UserResponse::from(input.user),
        }
    }
}

impl Exhaust<UserDto> for Presenter {
    type To = UserResponse;
    fn emit(&self, input: UserDto) -> Self::To {
        UserResponse::from(input)
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
