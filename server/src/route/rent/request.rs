use uuid::Uuid;

use application::transfer::BorrowDto;

use crate::controller::Intake;

/// Borrowing or returning is always done by the session's own user.
#[derive(Debug)]
pub struct BorrowRequest {
    book_id: Uuid,
    user_id: Uuid,
}

impl BorrowRequest {
    pub fn new(book_id: Uuid, user_id: Uuid) -> Self {
        Self { book_id, user_id }
    }
}

pub struct Transformer;

impl Intake<BorrowRequest> for Transformer {
    type To = BorrowDto;
    fn emit(&self, input: BorrowRequest) -> Self::To {
        BorrowDto {
            book_id: input.book_id,
            user_id: input.user_id,
        }
    }
}
