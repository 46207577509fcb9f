pub mod entity;
pub mod invariants;

pub use entity::{Genre, GenreID};
pub use invariants::validate_genre;
