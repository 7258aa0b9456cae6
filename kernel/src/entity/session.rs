use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

/// Opaque handle returned on login and presented on later requests.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn new(token: impl Into<Uuid>) -> Self {
        Self(token.into())
    }
}
