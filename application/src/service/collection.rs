use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{DependOnStoreSynchronizer, StoreSynchronizer};
use kernel::prelude::collection::BookList;
use kernel::KernelError;

/// The in-process catalog.
///
/// Writers hold the write guard for the whole store round trip, and take it
/// before opening a store transaction. Readers only ever take the read guard.
#[derive(Debug, Default)]
pub struct BookCollection(RwLock<BookList>);

impl BookCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, BookList> {
        self.0.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, BookList> {
        self.0.write().await
    }
}

pub trait DependOnBookCollection: 'static + Sync + Send {
    fn book_collection(&self) -> &BookCollection;
}

#[async_trait::async_trait]
pub trait LoadBookService:
    'static
    + Sync
    + Send
    + DependOnBookCollection
    + DependOnDatabaseConnection
    + DependOnBookQuery
    + DependOnStoreSynchronizer
{
    /// Replaces the catalog with the store's contents.
    async fn load_books(&self) -> error_stack::Result<usize, KernelError> {
        if let Err(report) = self.store_synchronizer().sync_from().await {
            warn!(error = ?report, "Failed to synchronize catalog from store");
        }
        let mut books = self.book_collection().write().await;
        let mut connection = self.database_connection().transact().await?;
        let stored = self.book_query().get_all(&mut connection).await?;
        connection.roll_back().await?;

        books.clear();
        // The store is newest first and the list prepends.
        books.extend(stored.into_iter().rev());
        info!(count = books.len(), "Loaded catalog");
        Ok(books.len())
    }
}

impl<T> LoadBookService for T where
    T: DependOnBookCollection
        + DependOnDatabaseConnection
        + DependOnBookQuery
        + DependOnStoreSynchronizer
{
}
