use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{User, UserEmail, UserId, UserPatch};
use kernel::KernelError;

use crate::database::MemoryTransaction;

pub struct MemoryUserRepository;

#[async_trait::async_trait]
impl UserQuery for MemoryUserRepository {
    type Transaction = MemoryTransaction;

    async fn get_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        Ok(con.users.clone())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        con: &mut MemoryTransaction,
        email: &UserEmail,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con
            .users
            .iter()
            .find(|user| user.email().matches(email))
            .cloned())
    }
}

#[async_trait::async_trait]
impl UserModifier for MemoryUserRepository {
    type Transaction = MemoryTransaction;

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
        patch: UserPatch,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let updated = con
            .users
            .iter_mut()
            .find(|user| user.id() == user_id)
            .map(|user| {
                user.apply(patch);
                user.clone()
            });
        Ok(updated)
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::UserQuery;
    use kernel::interface::update::UserModifier;
    use kernel::prelude::entity::{UserEmail, UserId, UserName, UserPatch, UserRole};
    use kernel::KernelError;

    use crate::database::{MemoryDatabase, MemoryUserRepository};

    #[tokio::test]
    async fn find_by_email_ignores_case() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::with_sample_data()?;
        let mut con = db.transact().await?;

        let admin = MemoryUserRepository
            .find_by_email(&mut con, &UserEmail::new("ADMIN@library.com"))
            .await?
            .expect("sample admin");
        assert!(admin.role().is_admin());

        let nobody = MemoryUserRepository
            .find_by_email(&mut con, &UserEmail::new("nobody@example.com"))
            .await?;
        assert!(nobody.is_none());
        assert_eq!(MemoryUserRepository.get_all(&mut con).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_name_and_role() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::with_sample_data()?;
        let mut con = db.transact().await?;
        let jane = MemoryUserRepository
            .find_by_email(&mut con, &UserEmail::new("jane@example.com"))
            .await?
            .expect("sample user");

        let patch = UserPatch {
            name: Some(UserName::new("Jane Austen")),
            role: Some(UserRole::Admin),
        };
        let updated = MemoryUserRepository
            .update(&mut con, jane.id(), patch)
            .await?
            .expect("user exists");
        assert_eq!(updated.name(), &UserName::new("Jane Austen"));
        assert!(updated.role().is_admin());
        assert_eq!(updated.email(), jane.email());
        con.commit().await?;

        let mut con = db.transact().await?;
        let stored = MemoryUserRepository
            .find_by_id(&mut con, jane.id())
            .await?
            .expect("user exists");
        assert_eq!(stored, updated);

        let missing = MemoryUserRepository
            .update(&mut con, &UserId::new(Uuid::new_v4()), UserPatch::default())
            .await?;
        assert!(missing.is_none());
        Ok(())
    }
}
