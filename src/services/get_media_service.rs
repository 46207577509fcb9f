// src/services/get_media_service.rs
//
// Get Media Service - reads the stored bytes of one media slot.
// The object is resolved through the saved descriptor, so only bytes the
// video actually references are ever served.

use std::sync::Arc;

use crate::domain::{Resource, VideoID, VideoMediaType};
use crate::error::{AppError, AppResult};
use crate::infrastructure::MediaResourceGateway;
use crate::repositories::VideoGateway;

pub struct GetMediaService {
    video_gateway: Arc<dyn VideoGateway>,
    media_gateway: Arc<dyn MediaResourceGateway>,
}

impl GetMediaService {
    pub fn new(
        video_gateway: Arc<dyn VideoGateway>,
        media_gateway: Arc<dyn MediaResourceGateway>,
    ) -> Self {
        Self {
            video_gateway,
            media_gateway,
        }
    }

    pub fn execute(&self, video_id: &VideoID, media_type: VideoMediaType) -> AppResult<Resource> {
        let missing = || {
            AppError::NotFound(format!(
                "Resource {} not found for video {}",
                media_type, video_id
            ))
        };

        let video = self
            .video_gateway
            .find_by_id(video_id)?
            .ok_or_else(|| AppError::not_found("Video", video_id))?;
        let location = video.media_location(media_type).ok_or_else(missing)?;

        self.media_gateway
            .get_resource_at(location)?
            .ok_or_else(missing)
    }
}
