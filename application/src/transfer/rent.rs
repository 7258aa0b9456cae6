use uuid::Uuid;

use crate::transfer::BookDto;

pub struct BorrowDto {
    pub book_id: Uuid,
    pub user_id: Uuid,
}

pub struct GetBorrowerBookDto {
    pub user_id: Uuid,
}

/// A lent book together with the name of whoever holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowedBookDto {
    pub book: BookDto,
    pub borrower_name: String,
}
