// src/services/delete_video_service.rs
//
// Delete Video Service
//
// CRITICAL RULES:
// - Record first, bytes second
// - Deleting an unknown id succeeds
// - The two steps are not transactional: a failure while clearing bytes
//   leaves orphaned objects behind and is reported to the caller

use std::sync::Arc;

use log::info;

use crate::domain::VideoID;
use crate::error::AppResult;
use crate::events::{EventBus, VideoDeleted};
use crate::infrastructure::MediaResourceGateway;
use crate::repositories::VideoGateway;

pub struct DeleteVideoService {
    video_gateway: Arc<dyn VideoGateway>,
    media_gateway: Arc<dyn MediaResourceGateway>,
    event_bus: Arc<EventBus>,
}

impl DeleteVideoService {
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

    pub fn execute(&self, video_id: &VideoID) -> AppResult<()> {
        self.video_gateway.delete_by_id(video_id)?;
        self.media_gateway.clear_resources(video_id)?;

        info!("[DELETE] Video {} removed with its media", video_id);
        self.event_bus.emit(VideoDeleted::new(video_id.clone()));

        Ok(())
    }
}
