// src/lib.rs
// MediaCatalog - administration core of a video catalog
//
// Architecture:
// - Domain-centric: aggregates own their invariants and media lifecycle
// - Validation accumulates every violation before failing
// - Services are single use cases over gateway traits
// - Event-driven: services publish facts on an in-process bus
// - Encoder results arrive asynchronously through a queue listener

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_cast_member,
    validate_category,
    validate_genre,
    validate_video,
    AggregateRoot,
    // Cast Member
    CastMember,
    CastMemberID,
    CastMemberType,
    // Category
    Category,
    CategoryID,
    DomainError,
    DomainResult,
    Entity,
    // Genre
    Genre,
    GenreID,
    ImageMedia,
    ImageType,
    MediaKind,
    MediaStatus,
    // Validation
    Notification,
    Rating,
    Resource,
    ResourceID,
    ThrowsValidationHandler,
    TranscodedType,
    ValidationHandler,
    // Video
    Video,
    VideoDetails,
    VideoID,
    VideoMedia,
    VideoMediaType,
    VideoResource,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, DomainEvent, Emission, EventBus, VideoCreated, VideoDeleted,
    VideoMediaCreated, VideoMediaStatusChanged,
};

// ============================================================================
// PUBLIC API - Gateways & Storage
// ============================================================================

pub use repositories::{
    CastMemberGateway, CategoryGateway, GenreGateway, InMemoryCastMemberGateway,
    InMemoryCategoryGateway, InMemoryGenreGateway, InMemoryVideoGateway, VideoGateway,
};

pub use infrastructure::{
    DefaultMediaResourceGateway, InMemoryStorageService, LocalStorageService,
    MediaResourceGateway, StorageService,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CreateVideoRequest,
    CreateVideoResponse,
    CreateVideoService,
    DeleteVideoService,
    GetMediaService,
    StatusUpdateOutcome,
    UpdateMediaStatusRequest,
    UpdateMediaStatusService,
    UploadMediaRequest,
    UploadMediaResponse,
    UploadMediaService,
};

// ============================================================================
// PUBLIC API - Application & Integrations
// ============================================================================

pub use application::{
    AppState, CatalogCommand, CommandReply, ErrorResponse, ErrorType, Gateways,
};
pub use config::CatalogConfig;
pub use integrations::{EncoderListener, ListenerConfig, MessageOutcome, VideoEncoderResult};
