// src/domain/entity.rs
//
// Identity and self-validation contract implemented by every aggregate.

use std::fmt::Display;
use std::hash::Hash;

use uuid::Uuid;

use crate::domain::validation::{Notification, ValidationHandler};
use crate::domain::DomainResult;

/// Opaque, immutable, string-backed identifier
pub trait Identifier: Clone + Eq + Hash + Display {
    fn value(&self) -> &str;
}

/// Something with identity that can check its own invariants
pub trait Entity {
    type Id: Identifier;

    fn id(&self) -> &Self::Id;

    /// Append every violated rule to `handler`.
    ///
    /// Only the handler may turn a violation into an `Err`; with a
    /// Notification this always returns `Ok`.
    fn validate(&self, handler: &mut dyn ValidationHandler) -> DomainResult<()>;
}

/// Consistency boundary: construction and mutation are all-or-nothing
pub trait AggregateRoot: Entity {
    /// Aggregate name used in error messages
    const NAME: &'static str;

    /// Run `validate` through a fresh Notification and fail with the
    /// complete list when anything was recorded
    fn self_validate(&self) -> DomainResult<()> {
        let mut notification = Notification::create();
        self.validate(&mut notification)?;
        notification.into_result(format!("Failed to validate Aggregate {}", Self::NAME))
    }
}

/// New identifier value: a v4 UUID rendered as 32 lowercase hex chars
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Declares a string-backed identifier type implementing [`Identifier`]
macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Freshly generated identifier
            pub fn unique() -> Self {
                Self($crate::domain::entity::generate_id())
            }

            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }
        }

        impl $crate::domain::entity::Identifier for $name {
            fn value(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

pub(crate) use define_identifier;

#[cfg(test)]
mod tests {
    use super::*;

    define_identifier!(
        /// Identifier used only by these tests
        SampleID
    );

    #[test]
    fn test_generated_ids_are_unique_hex() {
        let a = SampleID::unique();
        let b = SampleID::unique();
        assert_ne!(a, b);
        assert_eq!(a.value().len(), 32);
        assert!(a.value().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_identifier_round_trips_as_plain_string() {
        let id = SampleID::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        assert_eq!(id.to_string(), "abc");
    }
}
