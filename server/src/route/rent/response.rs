use axum::Json;
use serde::Serialize;

use application::transfer::BorrowedBookDto;

use crate::controller::Exhaust;
use crate::route::book::BookResponse;

#[derive(Debug, Serialize)]
pub struct BorrowedBookResponse {
    #[serde(flatten)]
    book: BookResponse,
    borrower_name: String,
}

pub struct Presenter;

impl Exhaust<Vec<BorrowedBookDto>> for Presenter {
    type To = Json<Vec<BorrowedBookResponse>>;
    fn emit(&self, input: Vec<BorrowedBookDto>) -> Self::To {
        Json(
            input
                .into_iter()
                .map(|lent| BorrowedBookResponse {
                    book: BookResponse::from(lent.book),
                    borrower_name: lent.borrower_name,
                })
                .collect(),
        )
    }
}
