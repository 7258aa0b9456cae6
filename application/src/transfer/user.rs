use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, User, UserRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub borrowed_books: Vec<Uuid>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            role,
            borrowed_books,
        } = value.into_destruct();
        let borrowed_books: Vec<_> = borrowed_books.into();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            is_admin: role.is_admin(),
            borrowed_books: borrowed_books.into_iter().map(Into::into).collect(),
        }
    }
}

pub struct UpdateUserDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub is_admin: Option<bool>,
}

impl UpdateUserDto {
    pub(crate) fn role(&self) -> Option<UserRole> {
        self.is_admin.map(|is_admin| match is_admin {
            true => UserRole::Admin,
            false => UserRole::User,
        })
    }
}
