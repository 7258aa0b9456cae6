use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookId, UserId};
use crate::KernelError;

/// Read access to the store's copy of the catalog. Results are newest first.
#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn get_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    /// Case-insensitive substring match on title, author or ISBN.
    async fn search(
        &self,
        con: &mut Self::Transaction,
        query: &str,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_category(
        &self,
        con: &mut Self::Transaction,
        category: &str,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_borrower(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
