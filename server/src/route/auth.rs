use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use error_stack::Report;
use uuid::Uuid;

use application::service::SessionService;
use application::transfer::{SessionTokenDto, UserDto};
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// The user behind the `Authorization: Bearer <session token>` header.
pub struct Authenticated(pub UserDto);

impl Authenticated {
    /// Users may act on their own record; administrators on anyone's.
    pub fn ensure_self_or_admin(&self, user_id: Uuid) -> Result<(), ErrorStatus> {
        if self.0.is_admin || self.0.id == user_id {
            return Ok(());
        }
        Err(Report::new(KernelError::Authorization)
            .attach_printable("Only the user or an administrator may do this")
            .into())
    }
}

#[async_trait]
impl FromRequestParts<AppModule> for Authenticated {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    Report::new(KernelError::Authentication)
                        .attach_printable(rejection.to_string())
                })?;
        let token = Uuid::parse_str(bearer.token()).map_err(|_| {
            Report::new(KernelError::Authentication).attach_printable("Malformed session token")
        })?;
        let user = state
            .current_user(SessionTokenDto { token })
            .await
            .map_err(|report| {
                if *report.current_context() == KernelError::NotFound {
                    report.change_context(KernelError::Authentication)
                } else {
                    report
                }
            })?;
        Ok(Self(user))
    }
}

/// Passes only when the session belongs to an administrator.
pub struct Admin;

#[async_trait]
impl FromRequestParts<AppModule> for Admin {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(user) = Authenticated::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(Report::new(KernelError::Authorization)
                .attach_printable("Administrator role required")
                .into());
        }
        Ok(Self)
    }
}
