use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::KernelError;

use crate::service::DependOnBookCollection;
use crate::transfer::StatsDto;

#[async_trait::async_trait]
pub trait StatsService:
    'static + Sync + Send + DependOnBookCollection + DependOnDatabaseConnection + DependOnUserQuery
{
    async fn get_stats(&self) -> error_stack::Result<StatsDto, KernelError> {
        let (total_books, available_books) = {
            let books = self.book_collection().read().await;
            (books.len(), books.available().len())
        };

        let mut connection = self.database_connection().transact().await?;
        let total_users = self.user_query().get_all(&mut connection).await?.len();
        connection.roll_back().await?;

        Ok(StatsDto {
            total_books,
            available_books,
            borrowed_books: total_books - available_books,
            total_users,
        })
    }
}

impl<T> StatsService for T where
    T: DependOnBookCollection + DependOnDatabaseConnection + DependOnUserQuery
{
}
