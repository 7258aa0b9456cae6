use error_stack::Report;
use tracing::info;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::session::{DependOnSessionStore, SessionStore};
use kernel::prelude::entity::{SessionToken, UserEmail};
use kernel::KernelError;

use crate::transfer::{LoginDto, SessionDto, SessionTokenDto, UserDto};

/// Login by email. Passwords are not part of the user record and are not checked.
#[async_trait::async_trait]
pub trait SessionService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnUserQuery + DependOnSessionStore
{
    async fn login(&self, dto: LoginDto) -> error_stack::Result<SessionDto, KernelError> {
        let email = UserEmail::try_new(dto.email)?;
        let mut connection = self.database_connection().transact().await?;
        let user = self.user_query().find_by_email(&mut connection, &email).await?;
        connection.roll_back().await?;
        let user = user.ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("No user with email {}", email.as_ref()))
        })?;

        let token = self.session_store().open(user.id()).await?;
        info!(user = %user.id(), "Logged in");
        Ok(SessionDto {
            token: token.into(),
            user: UserDto::from(user),
        })
    }

    async fn current_user(&self, dto: SessionTokenDto) -> error_stack::Result<UserDto, KernelError> {
        let token = SessionToken::new(dto.token);
        let user_id = self.session_store().find(&token).await?.ok_or_else(|| {
            Report::new(KernelError::NotFound).attach_printable("Session is not open")
        })?;

        let mut connection = self.database_connection().transact().await?;
        let user = self.user_query().find_by_id(&mut connection, &user_id).await?;
        connection.roll_back().await?;
        user.map(UserDto::from).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Session user {user_id} no longer exists"))
        })
    }

    async fn logout(&self, dto: SessionTokenDto) -> error_stack::Result<(), KernelError> {
        let token = SessionToken::new(dto.token);
        if !self.session_store().close(&token).await? {
            return Err(Report::new(KernelError::NotFound).attach_printable("Session is not open"));
        }
        info!("Logged out");
        Ok(())
    }
}

impl<T> SessionService for T where
    T: DependOnDatabaseConnection + DependOnUserQuery + DependOnSessionStore
{
}
