use error_stack::Report;
use tracing::info;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{UserId, UserName, UserPatch};
use kernel::KernelError;

use crate::transfer::{UpdateUserDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnDatabaseConnection + DependOnUserQuery {
    async fn get_users(&self) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().get_all(&mut connection).await?;
        connection.roll_back().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    async fn get_user(&self, id: Uuid) -> error_stack::Result<Option<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, &UserId::new(id))
            .await?;
        connection.roll_back().await?;
        Ok(user.map(UserDto::from))
    }
}

impl<T> GetUserService for T where T: DependOnDatabaseConnection + DependOnUserQuery {}

#[async_trait::async_trait]
pub trait UpdateUserService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnUserModifier
{
    async fn update_user(&self, dto: UpdateUserDto) -> error_stack::Result<UserDto, KernelError> {
        let id = UserId::new(dto.id);
        let patch = UserPatch {
            role: dto.role(),
            name: dto.name.map(UserName::try_new).transpose()?,
        };

        let mut connection = self.database_connection().transact().await?;
        let Some(user) = self
            .user_modifier()
            .update(&mut connection, &id, patch)
            .await?
        else {
            connection.roll_back().await?;
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No user with id {id}")));
        };
        connection.commit().await?;
        info!(id = %id, "Updated user");
        Ok(UserDto::from(user))
    }
}

impl<T> UpdateUserService for T where T: DependOnDatabaseConnection + DependOnUserModifier {}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::KernelError;

    use crate::service::test::TestModule;
    use crate::service::{GetUserService, UpdateUserService};
    use crate::transfer::UpdateUserDto;

    #[tokio::test]
    async fn lists_sample_users() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        let users = module.get_users().await?;
        assert_eq!(users.len(), 3);
        assert_eq!(users.iter().filter(|user| user.is_admin).count(), 1);

        let john = module.user_id("john@example.com").await;
        let found = module.get_user(john).await?.expect("sample user");
        assert_eq!(found.name, "John Doe");
        assert!(module.get_user(Uuid::new_v4()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_promotes_and_renames() -> error_stack::Result<(), KernelError> {
        let module = TestModule::sample().await;
        let jane = module.user_id("jane@example.com").await;

        let updated = module
            .update_user(UpdateUserDto {
                id: jane,
                name: Some("Jane Q. Smith".into()),
                is_admin: Some(true),
            })
            .await?;
        assert_eq!(updated.name, "Jane Q. Smith");
        assert!(updated.is_admin);
        assert_eq!(module.get_user(jane).await?, Some(updated));

        let report = module
            .update_user(UpdateUserDto {
                id: jane,
                name: Some(" ".into()),
                is_admin: None,
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        let report = module
            .update_user(UpdateUserDto {
                id: Uuid::new_v4(),
                name: None,
                is_admin: Some(false),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
