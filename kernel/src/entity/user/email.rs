use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn try_new(email: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let email = email.into();
        let trimmed = email.trim();
        let well_formed = trimmed
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !well_formed {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Invalid email address {trimmed:?}")));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn matches(&self, other: &UserEmail) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}
