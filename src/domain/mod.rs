// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod cast_member;
pub mod category;
pub mod entity;
pub mod genre;
pub mod validation;
pub mod video;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Shared contracts
pub use entity::{AggregateRoot, Entity, Identifier};
pub use validation::{Error, Notification, ThrowsValidationHandler, ValidationHandler};

// Cast Member Domain
pub use cast_member::{validate_cast_member, CastMember, CastMemberID, CastMemberType};

// Category Domain
pub use category::{validate_category, Category, CategoryID};

// Genre Domain
pub use genre::{validate_genre, Genre, GenreID};

// Video Domain
pub use video::{
    validate_video, ImageMedia, ImageType, MediaKind, MediaStatus, Rating, Resource, ResourceID,
    TranscodedType, Video, VideoDetails, VideoID, VideoMedia, VideoMediaType, VideoResource,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    /// Raised by the fail-fast handler on the first violation
    #[error("{0}")]
    Validation(validation::Error),

    /// Raised after a collect-all pass; carries every violation in rule order
    #[error("{message}: {}", format_errors(.errors))]
    Notification {
        message: String,
        errors: Vec<validation::Error>,
    },
}

impl DomainError {
    /// All violations carried by this error, in the order they were found
    pub fn errors(&self) -> Vec<validation::Error> {
        match self {
            DomainError::Validation(error) => vec![error.clone()],
            DomainError::Notification { errors, .. } => errors.clone(),
        }
    }
}

fn format_errors(errors: &[validation::Error]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
