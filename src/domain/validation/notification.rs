use super::handler::{Error, ValidationHandler};
use crate::domain::{DomainError, DomainResult};

/// Collect-all validation context.
///
/// Every appended error is kept in order; the caller decides afterwards
/// whether to abort with `into_result`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    errors: Vec<Error>,
}

impl Notification {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn with_error(error: Error) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Push an error without going through the handler contract
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(Error::new(message));
    }

    /// Ok when nothing was recorded, otherwise a single error carrying
    /// the complete ordered list
    pub fn into_result(self, message: impl Into<String>) -> DomainResult<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(DomainError::Notification {
            message: message.into(),
            errors: self.errors,
        })
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl ValidationHandler for Notification {
    fn append(&mut self, error: Error) -> DomainResult<()> {
        self.errors.push(error);
        Ok(())
    }

    fn errors(&self) -> &[Error] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_error_in_order() {
        let mut notification = Notification::create();
        notification.append(Error::new("first")).unwrap();
        notification.append(Error::new("second")).unwrap();

        assert!(notification.has_error());
        assert_eq!(notification.errors().len(), 2);
        assert_eq!(notification.first_error().unwrap().message, "first");
        assert_eq!(notification.errors()[1].message, "second");
    }

    #[test]
    fn test_empty_notification_is_ok() {
        let notification = Notification::create();
        assert!(!notification.has_error());
        assert!(notification.into_result("Failed").is_ok());
    }

    #[test]
    fn test_into_result_carries_complete_list() {
        let mut notification = Notification::with_error(Error::new("a"));
        notification.push("b");

        match notification.into_result("Failed to create a Aggregate Test") {
            Err(DomainError::Notification { message, errors }) => {
                assert_eq!(message, "Failed to create a Aggregate Test");
                assert_eq!(errors, vec![Error::new("a"), Error::new("b")]);
            }
            other => panic!("Expected notification error, got {:?}", other),
        }
    }

    #[test]
    fn test_append_all_merges_other_handler() {
        let mut source = Notification::create();
        source.push("x");
        source.push("y");

        let mut target = Notification::with_error(Error::new("w"));
        target.append_all(&source).unwrap();

        let messages: Vec<_> = target.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["w", "x", "y"]);
    }
}
