use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::update::StoreSynchronizer;
use kernel::prelude::entity::{Book, User};
use kernel::KernelError;

use crate::error::ConvertError;

pub use self::{book::*, seed::*, session::*, user::*};

mod book;
mod seed;
mod session;
mod user;

/// Contents of the store. `books` is kept newest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub(crate) books: Vec<Book>,
    pub(crate) users: Vec<User>,
}

/// In-process stand-in for the document database.
///
/// All access goes through [`MemoryTransaction`], which holds the single
/// store lock, so writers are serialized.
#[derive(Clone)]
pub struct MemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDatabase {
    /// Seeds from the `LIBRARY_SEED` environment variable.
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let seed = Seed::from_env().convert_error()?;
        Self::seeded(&seed)
    }

    pub fn seeded(seed: &Seed) -> error_stack::Result<Self, KernelError> {
        Ok(Self::from_state(seed.load()?))
    }

    pub fn with_sample_data() -> error_stack::Result<Self, KernelError> {
        Self::seeded(&Seed::Sample)
    }

    pub fn empty() -> Self {
        Self::from_state(MemoryState::default())
    }

    fn from_state(state: MemoryState) -> Self {
        debug!(
            books = state.books.len(),
            users = state.users.len(),
            "Memory store initialized"
        );
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(MemoryTransaction { guard, staged })
    }
}

#[async_trait::async_trait]
impl StoreSynchronizer for MemoryDatabase {
    async fn sync_to(&self) -> error_stack::Result<(), KernelError> {
        let state = self.state.lock().await;
        info!(
            books = state.books.len(),
            users = state.users.len(),
            "Synchronized catalog to store"
        );
        Ok(())
    }

    async fn sync_from(&self) -> error_stack::Result<(), KernelError> {
        debug!("Synchronizing catalog from store");
        Ok(())
    }
}

/// Works on a private copy of the state; `commit` publishes it.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let MemoryTransaction { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl Deref for MemoryTransaction {
    type Target = MemoryState;
    fn deref(&self) -> &Self::Target {
        &self.staged
    }
}

impl DerefMut for MemoryTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.staged
    }
}
