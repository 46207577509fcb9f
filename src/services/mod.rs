// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Each service is one use case: load the aggregate, let it decide,
// persist, then emit facts on the event bus.

pub mod create_video_service;
pub mod delete_video_service;
pub mod get_media_service;
pub mod update_media_status_service;
pub mod upload_media_service;


// Re-export all services and their types
pub use create_video_service::{CreateVideoRequest, CreateVideoResponse, CreateVideoService};

pub use delete_video_service::DeleteVideoService;

pub use get_media_service::GetMediaService;

pub use update_media_status_service::{
    StatusUpdateOutcome, UpdateMediaStatusRequest, UpdateMediaStatusService,
};

pub use upload_media_service::{UploadMediaRequest, UploadMediaResponse, UploadMediaService};
