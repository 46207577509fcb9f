// src/services/upload_media_service.rs
//
// Upload Media Service - Synchronous Upload Path
//
// CRITICAL RULES:
// - Bytes are stored BEFORE the descriptor is attached
// - Each upload is a new object; the saved descriptor's bytes are never
//   overwritten
// - A failed record write discards the new object; a successful one
//   discards the superseded object
// - Transcodable uploads always restart the slot at Pending
// - Only VIDEO and TRAILER uploads announce VideoMediaCreated

use std::sync::Arc;

use log::{info, warn};

use crate::domain::{Entity, MediaKind, Video, VideoID, VideoMediaType, VideoResource};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, VideoMediaCreated};
use crate::infrastructure::MediaResourceGateway;
use crate::repositories::VideoGateway;

/// Request to attach uploaded bytes to one media slot of a video
#[derive(Debug, Clone)]
pub struct UploadMediaRequest {
    pub video_id: VideoID,
    pub resource: VideoResource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMediaResponse {
    pub video_id: VideoID,
    pub media_type: VideoMediaType,
}

pub struct UploadMediaService {
    video_gateway: Arc<dyn VideoGateway>,
    media_gateway: Arc<dyn MediaResourceGateway>,
    event_bus: Arc<EventBus>,
}

impl UploadMediaService {
    pub fn new(
        video_gateway: Arc<dyn VideoGateway>,
        media_gateway: Arc<dyn MediaResourceGateway>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            video_gateway,
            media_gateway,
            event_bus,
        }
    }

    /// Store the bytes, attach the descriptor to its slot, persist.
    ///
    /// Fails with NotFound when the video does not exist; storage and
    /// gateway failures propagate unchanged.
    pub fn execute(&self, request: UploadMediaRequest) -> AppResult<UploadMediaResponse> {
        let UploadMediaRequest { video_id, resource } = request;
        let media_type = resource.media_type;

        // 1. Load
        let mut video = self.load(&video_id)?;
        let superseded = video.media_location(media_type).map(str::to_string);

        // 2. Store bytes and attach
        let (location, created) = match media_type.kind() {
            MediaKind::Transcoded(slot) => {
                let media = self.media_gateway.store_video(&video_id, &resource)?;
                let location = media.raw_location().to_string();
                let created = (media.id().clone(), location.clone());
                video.update_transcoded_media(slot, media);
                (location, Some(created))
            }
            MediaKind::Image(slot) => {
                let media = self.media_gateway.store_image(&video_id, &resource)?;
                let location = media.location().to_string();
                video.update_image_media(slot, media);
                (location, None)
            }
        };

        // 3. Persist; the losing object is discarded either way
        let video = match self.video_gateway.update(video) {
            Ok(video) => video,
            Err(e) => {
                self.discard(&location);
                return Err(e);
            }
        };
        if let Some(previous) = superseded.filter(|previous| *previous != location) {
            self.discard(&previous);
        }

        info!(
            "[UPLOAD] Stored {} for video {} ({} bytes)",
            media_type,
            video.id(),
            resource.resource.len()
        );

        // 4. Announce raw media to the encoder side
        if let Some((resource_id, file_path)) = created {
            self.event_bus.emit(VideoMediaCreated::new(
                video.id().clone(),
                resource_id,
                file_path,
            ));
        }

        Ok(UploadMediaResponse {
            video_id: video.id().clone(),
            media_type,
        })
    }

    /// Best effort: a leftover object is orphaned, never referenced
    fn discard(&self, location: &str) {
        if let Err(e) = self.media_gateway.delete_resource(location) {
            warn!("[UPLOAD] Could not discard {}: {}", location, e);
        }
    }

    fn load(&self, video_id: &VideoID) -> AppResult<Video> {
        self.video_gateway
            .find_by_id(video_id)?
            .ok_or_else(|| AppError::not_found("Video", video_id))
    }
}
