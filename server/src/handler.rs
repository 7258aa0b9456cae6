use std::ops::Deref;
use std::sync::Arc;

use application::service::{BookCollection, DependOnBookCollection, LoadBookService};
use driver::database::{
    MemoryBookRepository, MemoryDatabase, MemorySessionStore, MemoryUserRepository,
};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnBookQuery, DependOnUserQuery};
use kernel::interface::session::DependOnSessionStore;
use kernel::interface::update::{
    DependOnBookModifier, DependOnStoreSynchronizer, DependOnUserModifier,
};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Self::with_database(MemoryDatabase::new()?).await
    }

    pub async fn with_database(database: MemoryDatabase) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(database).await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    database: MemoryDatabase,
    sessions: MemorySessionStore,
    books: BookCollection,
}

impl Handler {
    /// Builds the module and loads the catalog from `database`.
    pub async fn init(database: MemoryDatabase) -> error_stack::Result<Self, KernelError> {
        let handler = Self {
            database,
            sessions: MemorySessionStore::from_env()?,
            books: BookCollection::new(),
        };
        handler.load_books().await?;
        Ok(handler)
    }
}

impl DependOnBookCollection for Handler {
    fn book_collection(&self) -> &BookCollection {
        &self.books
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = MemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnBookQuery for Handler {
    type BookQuery = MemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryBookRepository
    }
}

impl DependOnBookModifier for Handler {
    type BookModifier = MemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryBookRepository
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = MemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &MemoryUserRepository
    }
}

impl DependOnUserModifier for Handler {
    type UserModifier = MemoryUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &MemoryUserRepository
    }
}

impl DependOnStoreSynchronizer for Handler {
    type StoreSynchronizer = MemoryDatabase;
    fn store_synchronizer(&self) -> &Self::StoreSynchronizer {
        &self.database
    }
}

impl DependOnSessionStore for Handler {
    type SessionStore = MemorySessionStore;
    fn session_store(&self) -> &Self::SessionStore {
        &self.sessions
    }
}
