use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub is_available: bool,
    pub borrowed_by: Option<Uuid>,
    pub borrowed_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
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
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            category: category.into(),
            is_available: is_available.into(),
            borrowed_by: borrowed_by.map(Into::into),
            borrowed_at: borrowed_at.map(Into::into),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: Uuid,
}

pub struct SearchBookDto {
    pub query: String,
}

pub struct GetCategoryBookDto {
    pub category: String,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
}

pub struct UpdateBookDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
}

pub struct DeleteBookDto {
    pub id: Uuid,
}
