use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookId, BookPatch, BorrowedAt, NewBook, UserId};
use crate::KernelError;

/// Write access to the store.
///
/// "Not found" and "not permitted" are reported through `Option`/`bool`;
/// the error channel is reserved for the store itself failing.
#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Assigns identity and timestamps, and places the book first.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        book: NewBook,
    ) -> error_stack::Result<Book, KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;
    /// Fails when the book or user is unknown or the book is already out.
    async fn borrow(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
        user_id: &UserId,
        at: BorrowedAt,
    ) -> error_stack::Result<bool, KernelError>;
    /// Fails when the book or user is unknown or `user_id` is not the borrower.
    async fn return_book(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
