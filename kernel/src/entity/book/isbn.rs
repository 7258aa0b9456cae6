use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const MIN_LEN: usize = 10;
const MAX_LEN: usize = 17;

/// Digits and hyphens only, 10 to 17 characters once whitespace is removed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }

    pub fn try_new(isbn: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let compact = isbn
            .into()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>();
        if compact.is_empty() {
            return Err(Report::new(KernelError::Validation).attach_printable("ISBN is required"));
        }
        let well_formed = (MIN_LEN..=MAX_LEN).contains(&compact.len())
            && compact.chars().all(|c| c.is_ascii_digit() || c == '-');
        if !well_formed {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "Invalid ISBN {compact:?}: expected {MIN_LEN}-{MAX_LEN} digits with optional hyphens"
            )));
        }
        Ok(Self(compact))
    }

    /// `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}
