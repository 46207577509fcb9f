use super::entity::Category;
use crate::domain::validation::{Error, ValidationHandler};
use crate::domain::DomainResult;

const NAME_MIN_LENGTH: usize = 3;
const NAME_MAX_LENGTH: usize = 255;
const DESCRIPTION_MAX_LENGTH: usize = 4_000;

/// Validates all Category invariants, in declaration order
pub fn validate_category(
    category: &Category,
    handler: &mut dyn ValidationHandler,
) -> DomainResult<()> {
    check_name(category.raw_name(), handler)?;
    check_description(category.description(), handler)?;
    Ok(())
}

fn check_name(name: Option<&str>, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
    let Some(name) = name else {
        return handler.append(Error::new("'name' should not be null"));
    };

    if name.trim().is_empty() {
        return handler.append(Error::new("'name' should not be empty"));
    }

    let length = name.trim().chars().count();
    if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&length) {
        return handler.append(Error::new(format!(
            "'name' must be between {} and {} characters",
            NAME_MIN_LENGTH, NAME_MAX_LENGTH
        )));
    }

    Ok(())
}

/// Description is optional but bounded
fn check_description(
    description: Option<&str>,
    handler: &mut dyn ValidationHandler,
) -> DomainResult<()> {
    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX_LENGTH {
            return handler.append(Error::new(format!(
                "'description' must be at most {} characters",
                DESCRIPTION_MAX_LENGTH
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::domain::category::Category;
    use crate::domain::validation::{Notification, ThrowsValidationHandler, ValidationHandler};
    use crate::domain::{DomainError, Entity};

    #[test]
    fn test_valid_category() {
        let category = Category::new_category(
            Some("Movies".to_string()),
            Some("The most watched".to_string()),
            true,
        )
        .unwrap();
        assert_eq!(category.name(), "Movies");
        assert!(category.is_active());
        assert!(category.deleted_at().is_none());
    }

    #[test]
    fn test_inactive_category_has_deleted_at() {
        let category = Category::new_category(Some("Movies".to_string()), None, false).unwrap();
        assert!(!category.is_active());
        assert!(category.deleted_at().is_some());
    }

    #[test]
    fn test_name_and_description_errors_accumulate() {
        let error = Category::new_category(None, Some("d".repeat(4_001)), true).unwrap_err();
        let messages: Vec<_> = error.errors().into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "'name' should not be null",
                "'description' must be at most 4000 characters"
            ]
        );
    }

    #[test]
    fn test_fail_fast_handler_stops_at_first_rule() {
        let mut category = Category::new_category(Some("Movies".to_string()), None, true).unwrap();
        assert!(category.update(Some("".to_string()), None, true).is_err());

        // Validate an existing aggregate with both strategies
        let mut notification = Notification::create();
        category.validate(&mut notification).unwrap();
        assert!(!notification.has_error());

        let mut throws = ThrowsValidationHandler;
        assert!(category.validate(&mut throws).is_ok());
    }

    #[test]
    fn test_update_toggles_activation() {
        let mut category = Category::new_category(Some("Movies".to_string()), None, true).unwrap();
        category
            .update(Some("Series".to_string()), None, false)
            .unwrap();
        assert_eq!(category.name(), "Series");
        assert!(!category.is_active());

        category.activate();
        assert!(category.is_active());
        assert!(category.deleted_at().is_none());
    }

    #[test]
    fn test_empty_name_reports_once() {
        match Category::new_category(Some(String::new()), None, true) {
            Err(DomainError::Notification { errors, .. }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "'name' should not be empty");
            }
            other => panic!("Expected notification error, got {:?}", other),
        }
    }
}
