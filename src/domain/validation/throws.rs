use super::handler::{Error, ValidationHandler};
use crate::domain::{DomainError, DomainResult};

/// Fail-fast handler: the first appended error aborts the validation pass.
///
/// Used for defensive checks outside aggregate construction, where there is
/// nothing to gain from collecting more than one violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrowsValidationHandler;

impl ValidationHandler for ThrowsValidationHandler {
    fn append(&mut self, error: Error) -> DomainResult<()> {
        Err(DomainError::Validation(error))
    }

    fn errors(&self) -> &[Error] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::Notification;

    #[test]
    fn test_first_error_aborts() {
        let mut handler = ThrowsValidationHandler;
        let result = handler.append(Error::new("'name' should not be null"));

        match result {
            Err(DomainError::Validation(error)) => {
                assert_eq!(error.message, "'name' should not be null")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert!(!handler.has_error());
    }

    #[test]
    fn test_append_all_stops_at_first_error() {
        let mut source = Notification::create();
        source.push("one");
        source.push("two");

        let mut handler = ThrowsValidationHandler;
        match handler.append_all(&source) {
            Err(DomainError::Validation(error)) => assert_eq!(error.message, "one"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
