use serde::{Deserialize, Serialize};

use crate::domain::DomainResult;

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Error {
    pub message: String,
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Sink for rule violations.
///
/// Validators only call `append`; whether that aborts the pass (fail-fast)
/// or records the error and carries on (Notification) is up to the handler.
/// Validators propagate the result with `?` so both strategies share one
/// code path.
pub trait ValidationHandler {
    /// Record a violation
    fn append(&mut self, error: Error) -> DomainResult<()>;

    /// Errors recorded so far, in append order
    fn errors(&self) -> &[Error];

    /// Record every violation held by another handler, preserving order
    fn append_all(&mut self, other: &dyn ValidationHandler) -> DomainResult<()> {
        for error in other.errors() {
            self.append(error.clone())?;
        }
        Ok(())
    }

    fn has_error(&self) -> bool {
        !self.errors().is_empty()
    }

    fn first_error(&self) -> Option<&Error> {
        self.errors().first()
    }
}
