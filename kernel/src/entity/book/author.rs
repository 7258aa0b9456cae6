use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookAuthor(String);

impl BookAuthor {
    pub fn new(author: impl Into<String>) -> Self {
        Self(author.into())
    }

    pub fn try_new(author: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let author = author.into();
        let trimmed = author.trim();
        if trimmed.is_empty() {
            return Err(Report::new(KernelError::Validation).attach_printable("Author is required"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}
