use destructure::Destructure;
use vodca::References;

use crate::entity::{BookAuthor, BookCategory, BookTitle, Isbn};

/// Payload for adding a book; the store assigns identity and timestamps.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewBook {
    title: BookTitle,
    author: BookAuthor,
    isbn: Isbn,
    category: BookCategory,
}

impl NewBook {
    pub fn new(title: BookTitle, author: BookAuthor, isbn: Isbn, category: BookCategory) -> Self {
        Self {
            title,
            author,
            isbn,
            category,
        }
    }
}
