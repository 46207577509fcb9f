use super::entity::CastMember;
use crate::domain::validation::{Error, ValidationHandler};
use crate::domain::DomainResult;

const NAME_MIN_LENGTH: usize = 3;
const NAME_MAX_LENGTH: usize = 255;

/// Validates all CastMember invariants, in declaration order
pub fn validate_cast_member(
    member: &CastMember,
    handler: &mut dyn ValidationHandler,
) -> DomainResult<()> {
    check_name(member.raw_name(), handler)?;
    check_type(member, handler)?;
    Ok(())
}

/// Name is required, not blank, and within length bounds.
/// Only the first failing name rule is reported.
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

fn check_type(member: &CastMember, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
    if member.member_type().is_none() {
        return handler.append(Error::new("'type' should not be null"));
    }
    Ok(())
}
