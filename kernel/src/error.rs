use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// Unknown book, user or session.
    NotFound,
    /// The target exists but its current state forbids the operation,
    /// e.g. borrowing a book that is already out.
    InvalidState,
    /// Malformed input rejected before reaching the store.
    Validation,
    /// No open session was presented.
    Authentication,
    /// The session's user lacks the required role.
    Authorization,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Requested resource not found"),
            KernelError::InvalidState => write!(f, "Operation not permitted in current state"),
            KernelError::Validation => write!(f, "Validation failed"),
            KernelError::Authentication => write!(f, "Authentication required"),
            KernelError::Authorization => write!(f, "Permission denied"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
