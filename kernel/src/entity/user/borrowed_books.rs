use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::BookId;

/// Books currently held by a user, in the order they were borrowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct BorrowedBooks(Vec<BookId>);

impl BorrowedBooks {
    pub fn push(&mut self, book_id: BookId) {
        self.0.push(book_id);
    }

    pub fn remove(&mut self, book_id: &BookId) -> bool {
        let before = self.0.len();
        self.0.retain(|held| held != book_id);
        self.0.len() != before
    }

    pub fn contains(&self, book_id: &BookId) -> bool {
        self.0.contains(book_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
