pub mod entity;
pub mod invariants;

pub use entity::{Category, CategoryID};
pub use invariants::validate_category;
