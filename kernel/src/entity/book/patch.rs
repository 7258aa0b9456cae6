use crate::entity::{BookAuthor, BookCategory, BookTitle, BorrowedAt, IsAvailable, Isbn, UserId};

/// Partial update for a [`Book`](crate::entity::Book).
///
/// `None` leaves a field untouched. The borrower fields are doubly optional so
/// a patch can clear them: `Some(None)` removes the value.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BookPatch {
    pub title: Option<BookTitle>,
    pub author: Option<BookAuthor>,
    pub isbn: Option<Isbn>,
    pub category: Option<BookCategory>,
    pub is_available: Option<IsAvailable>,
    pub borrowed_by: Option<Option<UserId>>,
    pub borrowed_at: Option<Option<BorrowedAt>>,
}

impl BookPatch {
    pub fn borrow(user_id: UserId, at: BorrowedAt) -> Self {
        Self {
            is_available: Some(IsAvailable::new(false)),
            borrowed_by: Some(Some(user_id)),
            borrowed_at: Some(Some(at)),
            ..Self::default()
        }
    }

    pub fn release() -> Self {
        Self {
            is_available: Some(IsAvailable::new(true)),
            borrowed_by: Some(None),
            borrowed_at: Some(None),
            ..Self::default()
        }
    }
}
