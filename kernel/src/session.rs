use crate::entity::{SessionToken, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait SessionStore: 'static + Sync + Send {
    async fn open(&self, user_id: &UserId) -> error_stack::Result<SessionToken, KernelError>;
    async fn find(
        &self,
        token: &SessionToken,
    ) -> error_stack::Result<Option<UserId>, KernelError>;
    /// Returns `false` when the token was not open.
    async fn close(&self, token: &SessionToken) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnSessionStore: 'static + Sync + Send {
    type SessionStore: SessionStore;
    fn session_store(&self) -> &Self::SessionStore;
}
