use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn try_new(title: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(Report::new(KernelError::Validation).attach_printable("Title is required"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}
