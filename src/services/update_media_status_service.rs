// src/services/update_media_status_service.rs
//
// Update Media Status Service - Asynchronous Reconciliation Path
//
// CRITICAL RULES:
// - Applies encoder progress to a video's transcoded slots
// - The slot is found by resource id: `video` first, then `trailer`
// - Unknown resource ids are discarded, never errors
// - Status only moves forward; repeated messages change nothing
// - The aggregate is written only when it actually changed

use std::sync::Arc;

use log::{debug, info};

use crate::domain::{Entity, MediaStatus, ResourceID, Video, VideoID, VideoMediaType};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, VideoMediaStatusChanged};
use crate::repositories::VideoGateway;

/// Progress reported by the encoder for one stored resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMediaStatusRequest {
    pub status: MediaStatus,
    pub video_id: VideoID,
    pub resource_id: ResourceID,
    pub folder: String,
    pub filename: String,
}

impl UpdateMediaStatusRequest {
    /// Location of the encoded output: `folder/filename`
    pub fn encoded_path(&self) -> String {
        format!("{}/{}", self.folder, self.filename)
    }
}

/// What reconciliation did with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdateOutcome {
    /// The slot moved to a new status and the video was persisted
    Applied(VideoMediaType),
    /// The slot matched but was already at (or past) the reported status
    Unchanged(VideoMediaType),
    /// No transcoded slot holds the resource id
    Discarded,
}

pub struct UpdateMediaStatusService {
    video_gateway: Arc<dyn VideoGateway>,
    event_bus: Arc<EventBus>,
}

impl UpdateMediaStatusService {
    pub fn new(video_gateway: Arc<dyn VideoGateway>, event_bus: Arc<EventBus>) -> Self {
        Self {
            video_gateway,
            event_bus,
        }
    }

    pub fn execute(&self, request: UpdateMediaStatusRequest) -> AppResult<StatusUpdateOutcome> {
        // 1. Load; a missing video is fatal for this message
        let mut video = self.load(&request.video_id)?;

        // 2. Locate the slot
        let Some(media_type) = video.media_type_of(&request.resource_id) else {
            debug!(
                "[MEDIA STATUS] Resource {} is not attached to video {}, discarding",
                request.resource_id, request.video_id
            );
            return Ok(StatusUpdateOutcome::Discarded);
        };

        // 3. Transition
        let changed = match request.status {
            MediaStatus::Pending => false,
            MediaStatus::Processing => video.processing(media_type),
            MediaStatus::Completed => video.completed(media_type, &request.encoded_path()),
        };

        if !changed {
            debug!(
                "[MEDIA STATUS] {} of video {} already at {}",
                media_type, request.video_id, request.status
            );
            return Ok(StatusUpdateOutcome::Unchanged(media_type));
        }

        // 4. Persist
        let video = self.video_gateway.update(video)?;

        info!(
            "[MEDIA STATUS] {} of video {} is now {}",
            media_type,
            video.id(),
            request.status
        );

        self.event_bus.emit(VideoMediaStatusChanged::new(
            video.id().clone(),
            request.resource_id,
            media_type,
            request.status,
        ));

        Ok(StatusUpdateOutcome::Applied(media_type))
    }

    fn load(&self, video_id: &VideoID) -> AppResult<Video> {
        self.video_gateway
            .find_by_id(video_id)?
            .ok_or_else(|| AppError::not_found("Video", video_id))
    }
}
