use super::entity::Genre;
use crate::domain::validation::{Error, ValidationHandler};
use crate::domain::DomainResult;

const NAME_MAX_LENGTH: usize = 255;

/// Validates all Genre invariants
pub fn validate_genre(genre: &Genre, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
    let Some(name) = genre.raw_name() else {
        return handler.append(Error::new("'name' should not be null"));
    };

    if name.trim().is_empty() {
        return handler.append(Error::new("'name' should not be empty"));
    }

    let length = name.trim().chars().count();
    if length > NAME_MAX_LENGTH {
        return handler.append(Error::new(format!(
            "'name' must be between 1 and {} characters",
            NAME_MAX_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::domain::category::CategoryID;
    use crate::domain::genre::Genre;

    #[test]
    fn test_valid_genre() {
        let genre = Genre::new_genre(Some("Action".to_string()), true).unwrap();
        assert_eq!(genre.name(), "Action");
        assert!(genre.categories().is_empty());
    }

    #[test]
    fn test_name_rules() {
        let null = Genre::new_genre(None, true).unwrap_err();
        assert_eq!(null.errors()[0].message, "'name' should not be null");

        let long = Genre::new_genre(Some("g".repeat(256)), true).unwrap_err();
        assert_eq!(
            long.errors()[0].message,
            "'name' must be between 1 and 255 characters"
        );
    }

    #[test]
    fn test_category_membership_is_a_set() {
        let mut genre = Genre::new_genre(Some("Drama".to_string()), true).unwrap();
        let category = CategoryID::from("c1");
        genre.add_category(category.clone());
        genre.add_category(category.clone());
        assert_eq!(genre.categories().len(), 1);

        genre.remove_category(&category);
        assert!(genre.categories().is_empty());
    }

    #[test]
    fn test_failed_update_is_atomic() {
        let mut genre = Genre::new_genre(Some("Drama".to_string()), true).unwrap();
        let before = genre.clone();
        assert!(genre
            .update(Some(" ".to_string()), false, vec![CategoryID::from("c1")])
            .is_err());
        assert_eq!(genre, before);
    }
}
