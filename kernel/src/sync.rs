use crate::KernelError;

/// Best-effort notifications to the system of record. Callers log failures
/// instead of propagating them.
#[async_trait::async_trait]
pub trait StoreSynchronizer: 'static + Sync + Send {
    async fn sync_to(&self) -> error_stack::Result<(), KernelError>;
    async fn sync_from(&self) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnStoreSynchronizer: 'static + Sync + Send {
    type StoreSynchronizer: StoreSynchronizer;
    fn store_synchronizer(&self) -> &Self::StoreSynchronizer;
}
