// src/application/state.rs
//
// Application state: every service wired once and shared.

use std::sync::Arc;

use crate::events::EventBus;
use crate::infrastructure::{DefaultMediaResourceGateway, MediaResourceGateway, StorageService};
use crate::integrations::{EncoderListener, ListenerConfig};
use crate::repositories::{
    CastMemberGateway, CategoryGateway, GenreGateway, InMemoryCastMemberGateway,
    InMemoryCategoryGateway, InMemoryGenreGateway, InMemoryVideoGateway, VideoGateway,
};
use crate::services::{
    CreateVideoService, DeleteVideoService, GetMediaService, UpdateMediaStatusService,
    UploadMediaService,
};

/// Gateways the services are built on
pub struct Gateways {
    pub videos: Arc<dyn VideoGateway>,
    pub categories: Arc<dyn CategoryGateway>,
    pub genres: Arc<dyn GenreGateway>,
    pub cast_members: Arc<dyn CastMemberGateway>,
    pub media: Arc<dyn MediaResourceGateway>,
}

impl Gateways {
    /// In-memory records with media bytes kept in `storage`
    pub fn in_memory(storage: Arc<dyn StorageService>) -> Self {
        Self {
            videos: Arc::new(InMemoryVideoGateway::new()),
            categories: Arc::new(InMemoryCategoryGateway::default()),
            genres: Arc::new(InMemoryGenreGateway::default()),
            cast_members: Arc::new(InMemoryCastMemberGateway::default()),
            media: Arc::new(DefaultMediaResourceGateway::new(storage)),
        }
    }
}

/// All fields are Arc-wrapped for thread-safe sharing between the
/// upload path and the encoder listener.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub gateways: Gateways,
    pub create_video_service: Arc<CreateVideoService>,
    pub upload_media_service: Arc<UploadMediaService>,
    pub update_media_status_service: Arc<UpdateMediaStatusService>,
    pub get_media_service: Arc<GetMediaService>,
    pub delete_video_service: Arc<DeleteVideoService>,
    pub encoder_listener: Arc<EncoderListener>,
}

impl AppState {
    pub fn new(gateways: Gateways, event_bus: Arc<EventBus>, listener_config: ListenerConfig) -> Self {
        let create_video_service = Arc::new(CreateVideoService::new(
            gateways.videos.clone(),
            gateways.categories.clone(),
            gateways.genres.clone(),
            gateways.cast_members.clone(),
            gateways.media.clone(),
            event_bus.clone(),
        ));
        let upload_media_service = Arc::new(UploadMediaService::new(
            gateways.videos.clone(),
            gateways.media.clone(),
            event_bus.clone(),
        ));
        let update_media_status_service = Arc::new(UpdateMediaStatusService::new(
            gateways.videos.clone(),
            event_bus.clone(),
        ));
        let get_media_service = Arc::new(GetMediaService::new(
            gateways.videos.clone(),
            gateways.media.clone(),
        ));
        let delete_video_service = Arc::new(DeleteVideoService::new(
            gateways.videos.clone(),
            gateways.media.clone(),
            event_bus.clone(),
        ));
        let encoder_listener = Arc::new(EncoderListener::new(
            update_media_status_service.clone(),
            listener_config,
        ));

        Self {
            event_bus,
            gateways,
            create_video_service,
            upload_media_service,
            update_media_status_service,
            get_media_service,
            delete_video_service,
            encoder_listener,
        }
    }
}
