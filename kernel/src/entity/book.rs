mod author;
mod availability;
mod borrowed_at;
mod category;
mod id;
mod isbn;
mod new;
mod patch;
mod title;

pub use self::{
    author::*, availability::*, borrowed_at::*, category::*, id::*, isbn::*, new::*, patch::*,
    title::*,
};
use crate::entity::{CreatedAt, UpdatedAt, UserId};
use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: Isbn,
    category: BookCategory,
    is_available: IsAvailable,
    borrowed_by: Option<UserId>,
    borrowed_at: Option<BorrowedAt>,
    created_at: CreatedAt<Book>,
    updated_at: UpdatedAt<Book>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        isbn: Isbn,
        category: BookCategory,
        is_available: IsAvailable,
        borrowed_by: Option<UserId>,
        borrowed_at: Option<BorrowedAt>,
        created_at: CreatedAt<Book>,
        updated_at: UpdatedAt<Book>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
            category,
            is_available,
            borrowed_by,
            borrowed_at,
            created_at,
            updated_at,
        }
    }

    /// A freshly added, available book whose timestamps both read `now`.
    pub fn create(id: BookId, book: NewBook, now: OffsetDateTime) -> Self {
        let DestructNewBook {
            title,
            author,
            isbn,
            category,
        } = book.into_destruct();
        Self::new(
            id,
            title,
            author,
            isbn,
            category,
            IsAvailable::new(true),
            None,
            None,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    pub fn is_borrowed_by(&self, user_id: &UserId) -> bool {
        self.borrowed_by.as_ref() == Some(user_id)
    }

    /// Merges `patch` into the record and advances `updated_at`.
    /// Fields the patch leaves unset keep their current value.
    pub fn apply(&mut self, patch: BookPatch) {
        let BookPatch {
            title,
            author,
            isbn,
            category,
            is_available,
            borrowed_by,
            borrowed_at,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(author) = author {
            self.author = author;
        }
        if let Some(isbn) = isbn {
            self.isbn = isbn;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(is_available) = is_available {
            self.is_available = is_available;
        }
        if let Some(borrowed_by) = borrowed_by {
            self.borrowed_by = borrowed_by;
        }
        if let Some(borrowed_at) = borrowed_at {
            self.borrowed_at = borrowed_at;
        }
        self.updated_at.advance(OffsetDateTime::now_utc());
    }
}
