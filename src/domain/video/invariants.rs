use super::entity::Video;
use crate::domain::validation::{Error, ValidationHandler};
use crate::domain::DomainResult;

const TITLE_MAX_LENGTH: usize = 255;
const DESCRIPTION_MAX_LENGTH: usize = 4_000;

/// Validates all Video invariants, in declaration order
pub fn validate_video(video: &Video, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
    check_title(video.title(), handler)?;
    check_description(video.description(), handler)?;
    check_launched_at(video.launched_at(), handler)?;
    check_duration(video.duration(), handler)?;
    Ok(())
}

fn check_title(title: &str, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
    if title.trim().is_empty() {
        return handler.append(Error::new("'title' should not be empty"));
    }

    if title.trim().chars().count() > TITLE_MAX_LENGTH {
        return handler.append(Error::new(format!(
            "'title' must be between 1 and {} characters",
            TITLE_MAX_LENGTH
        )));
    }

    Ok(())
}

fn check_description(description: &str, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
    if description.trim().is_empty() {
        return handler.append(Error::new("'description' should not be empty"));
    }

    if description.trim().chars().count() > DESCRIPTION_MAX_LENGTH {
        return handler.append(Error::new(format!(
            "'description' must be between 1 and {} characters",
            DESCRIPTION_MAX_LENGTH
        )));
    }

    Ok(())
}

/// Zero stands for an unset launch year
fn check_launched_at(launched_at: u16, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
    if launched_at == 0 {
        return handler.append(Error::new("'launched_at' should not be null"));
    }
    Ok(())
}

fn check_duration(duration: f64, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
    if !duration.is_finite() || duration < 0.0 {
        return handler.append(Error::new("'duration' must be a non-negative number"));
    }
    Ok(())
}

/// Invariants that must hold true for the Video aggregate:
///
/// 1. Identity is immutable
/// 2. Title and description are never blank
/// 3. Media slots only change through the aggregate's own methods
/// 4. Transcoded media status never moves backwards
/// 5. Uploaded transcoded media always starts at Pending
/// 6. updated_at reflects the last effective mutation
