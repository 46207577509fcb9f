pub mod entity;
pub mod invariants;

pub use entity::{CastMember, CastMemberID, CastMemberType};
pub use invariants::validate_cast_member;
