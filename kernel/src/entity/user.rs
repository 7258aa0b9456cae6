mod borrowed_books;
mod email;
mod id;
mod name;
mod patch;
mod role;

pub use self::{borrowed_books::*, email::*, id::*, name::*, patch::*, role::*};
use crate::entity::BookId;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
    role: UserRole,
    borrowed_books: BorrowedBooks,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: UserEmail,
        role: UserRole,
        borrowed_books: BorrowedBooks,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            borrowed_books,
        }
    }

    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
    }

    pub fn hold(&mut self, book_id: BookId) {
        if !self.borrowed_books.contains(&book_id) {
            self.borrowed_books.push(book_id);
        }
    }

    pub fn release(&mut self, book_id: &BookId) -> bool {
        self.borrowed_books.remove(book_id)
    }
}
