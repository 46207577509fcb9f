// src/repositories/mod.rs
//
// Gateway layer
//
// CRITICAL RULES:
// - Gateways are DUMB stores
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - `update` replaces the whole persisted record with the in-memory aggregate
// - Stale writes are rejected through the video version token

pub mod relation_repository;
pub mod video_repository;

pub use relation_repository::{
    CastMemberGateway, CategoryGateway, GenreGateway, InMemoryCastMemberGateway,
    InMemoryCategoryGateway, InMemoryGenreGateway,
};
pub use video_repository::{InMemoryVideoGateway, VideoGateway};

#[cfg(test)]
pub use relation_repository::{MockCastMemberGateway, MockCategoryGateway, MockGenreGateway};
#[cfg(test)]
pub use video_repository::MockVideoGateway;
