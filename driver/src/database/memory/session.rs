use std::collections::HashMap;
use std::sync::Arc;

use error_stack::ResultExt;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use kernel::interface::session::SessionStore;
use kernel::prelude::entity::{SessionToken, UserId};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

const SESSION_TTL_KEY: &str = "SESSION_TTL_MINUTES";
const DEFAULT_TTL: Duration = Duration::hours(12);

#[derive(Debug, Clone)]
struct Session {
    user_id: UserId,
    expires_at: OffsetDateTime,
}

/// Tokens of logged-in users. Lives only as long as the process.
///
/// A token expires `ttl` after login. Expired tokens are dropped on the next
/// lookup of that token or on the next login.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
    ttl: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Reads the lifetime from `SESSION_TTL_MINUTES`, twelve hours when unset.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let Some(minutes) = env(SESSION_TTL_KEY).convert_error()? else {
            return Ok(Self::new());
        };
        let minutes = minutes
            .parse::<u32>()
            .convert_error()
            .attach_printable_lazy(|| format!("{SESSION_TTL_KEY} must be a whole number"))?;
        Ok(Self::with_ttl(Duration::minutes(i64::from(minutes))))
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn open(&self, user_id: &UserId) -> error_stack::Result<SessionToken, KernelError> {
        let token = SessionToken::new(Uuid::new_v4());
        let now = OffsetDateTime::now_utc();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                user_id: user_id.clone(),
                expires_at: now + self.ttl,
            },
        );
        debug!(user = %user_id, open = sessions.len(), "Opened session");
        Ok(token)
    }

    async fn find(
        &self,
        token: &SessionToken,
    ) -> error_stack::Result<Option<UserId>, KernelError> {
        let now = OffsetDateTime::now_utc();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return Ok(None),
                Some(session) if session.expires_at > now => {
                    return Ok(Some(session.user_id.clone()))
                }
                Some(_) => {}
            }
        }
        self.sessions.write().await.remove(token);
        debug!("Dropped expired session");
        Ok(None)
    }

    async fn close(&self, token: &SessionToken) -> error_stack::Result<bool, KernelError> {
        let now = OffsetDateTime::now_utc();
        let removed = self.sessions.write().await.remove(token);
        Ok(removed.is_some_and(|session| session.expires_at > now))
    }
}
