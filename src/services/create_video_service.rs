// src/services/create_video_service.rs
//
// Create Video Service
//
// CRITICAL RULES:
// - Referenced categories, genres and cast members MUST exist
// - Missing relations and attribute violations are reported together
// - The record is persisted before any media is stored
// - If storing media fails the video is rolled back (record and bytes)

use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;

use log::{info, warn};

use crate::domain::{
    CastMemberID, CategoryID, Entity, GenreID, MediaKind, Notification, Rating, Resource,
    ResourceID, Video, VideoDetails, VideoID, VideoMediaType, VideoResource,
};
use crate::error::AppResult;
use crate::events::{EventBus, VideoCreated, VideoMediaCreated};
use crate::infrastructure::MediaResourceGateway;
use crate::repositories::{CastMemberGateway, CategoryGateway, GenreGateway, VideoGateway};

/// Request to register a new video, optionally with its media
#[derive(Debug, Clone)]
pub struct CreateVideoRequest {
    pub title: String,
    pub description: String,
    pub launched_at: u16,
    pub duration: f64,
    pub rating: Rating,
    pub opened: bool,
    pub published: bool,
    pub categories: BTreeSet<CategoryID>,
    pub genres: BTreeSet<GenreID>,
    pub cast_members: BTreeSet<CastMemberID>,
    pub video: Option<Resource>,
    pub trailer: Option<Resource>,
    pub banner: Option<Resource>,
    pub thumbnail: Option<Resource>,
    pub thumbnail_half: Option<Resource>,
}

impl CreateVideoRequest {
    fn details(&self) -> VideoDetails {
        VideoDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            launched_at: self.launched_at,
            duration: self.duration,
            rating: self.rating,
            opened: self.opened,
            published: self.published,
            categories: self.categories.clone(),
            genres: self.genres.clone(),
            cast_members: self.cast_members.clone(),
        }
    }

    /// Supplied media in slot order
    fn resources(self) -> Vec<VideoResource> {
        [
            (VideoMediaType::Video, self.video),
            (VideoMediaType::Trailer, self.trailer),
            (VideoMediaType::Banner, self.banner),
            (VideoMediaType::Thumbnail, self.thumbnail),
            (VideoMediaType::ThumbnailHalf, self.thumbnail_half),
        ]
        .into_iter()
        .filter_map(|(media_type, resource)| {
            resource.map(|resource| VideoResource::new(resource, media_type))
        })
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVideoResponse {
    pub id: VideoID,
}

pub struct CreateVideoService {
    video_gateway: Arc<dyn VideoGateway>,
    category_gateway: Arc<dyn CategoryGateway>,
    genre_gateway: Arc<dyn GenreGateway>,
    cast_member_gateway: Arc<dyn CastMemberGateway>,
    media_gateway: Arc<dyn MediaResourceGateway>,
    event_bus: Arc<EventBus>,
}

impl CreateVideoService {
    pub fn new(
        video_gateway: Arc<dyn VideoGateway>,
        category_gateway: Arc<dyn CategoryGateway>,
        genre_gateway: Arc<dyn GenreGateway>,
        cast_member_gateway: Arc<dyn CastMemberGateway>,
        media_gateway: Arc<dyn MediaResourceGateway>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            video_gateway,
            category_gateway,
            genre_gateway,
            cast_member_gateway,
            media_gateway,
            event_bus,
        }
    }

    pub fn execute(&self, request: CreateVideoRequest) -> AppResult<CreateVideoResponse> {
        // 1. Relations and attributes, collected into one notification
        let mut notification = Notification::create();
        self.validate_relations(&request, &mut notification)?;

        let video = Video::assemble(request.details());
        video.validate(&mut notification)?;
        notification.into_result("Could not create Aggregate Video")?;

        // 2. Persist the bare record
        let video = self.video_gateway.create(video)?;
        let video_id = video.id().clone();

        // 3. Attach media, undoing the creation on failure
        let (video, created_media) = match self.attach_media(video, request.resources()) {
            Ok(attached) => attached,
            Err(e) => {
                self.rollback(&video_id);
                return Err(e);
            }
        };

        info!("[CREATE] Video {} created: {}", video_id, video.title());

        self.event_bus
            .emit(VideoCreated::new(video_id.clone(), video.title().to_string()));
        for (resource_id, file_path) in created_media {
            self.event_bus.emit(VideoMediaCreated::new(
                video_id.clone(),
                resource_id,
                file_path,
            ));
        }

        Ok(CreateVideoResponse { id: video_id })
    }

    fn validate_relations(
        &self,
        request: &CreateVideoRequest,
        notification: &mut Notification,
    ) -> AppResult<()> {
        let requested: Vec<_> = request.categories.iter().cloned().collect();
        if !requested.is_empty() {
            let found = self.category_gateway.exists_by_ids(&requested)?;
            report_missing("categories", &requested, &found, notification);
        }

        let requested: Vec<_> = request.genres.iter().cloned().collect();
        if !requested.is_empty() {
            let found = self.genre_gateway.exists_by_ids(&requested)?;
            report_missing("genres", &requested, &found, notification);
        }

        let requested: Vec<_> = request.cast_members.iter().cloned().collect();
        if !requested.is_empty() {
            let found = self.cast_member_gateway.exists_by_ids(&requested)?;
            report_missing("cast members", &requested, &found, notification);
        }

        Ok(())
    }

    /// Store every supplied resource and persist the video once.
    /// Returns the updated video and the transcodable media that was created.
    fn attach_media(
        &self,
        mut video: Video,
        resources: Vec<VideoResource>,
    ) -> AppResult<(Video, Vec<(ResourceID, String)>)> {
        if resources.is_empty() {
            return Ok((video, Vec::new()));
        }

        let video_id = video.id().clone();
        let mut created = Vec::new();

        for resource in &resources {
            match resource.media_type.kind() {
                MediaKind::Transcoded(slot) => {
                    let media = self.media_gateway.store_video(&video_id, resource)?;
                    created.push((media.id().clone(), media.raw_location().to_string()));
                    video.update_transcoded_media(slot, media);
                }
                MediaKind::Image(slot) => {
                    let media = self.media_gateway.store_image(&video_id, resource)?;
                    video.update_image_media(slot, media);
                }
            }
        }

        let video = self.video_gateway.update(video)?;
        Ok((video, created))
    }

    fn rollback(&self, video_id: &VideoID) {
        warn!("[CREATE] Rolling back video {} after media failure", video_id);

        if let Err(e) = self.video_gateway.delete_by_id(video_id) {
            warn!("[CREATE] Rollback could not delete video {}: {}", video_id, e);
        }
        if let Err(e) = self.media_gateway.clear_resources(video_id) {
            warn!("[CREATE] Rollback could not clear media of {}: {}", video_id, e);
        }
    }
}

fn report_missing<T: PartialEq + Display>(
    label: &str,
    requested: &[T],
    found: &[T],
    notification: &mut Notification,
) {
    let missing: Vec<String> = requested
        .iter()
        .filter(|id| !found.contains(id))
        .map(ToString::to_string)
        .collect();

    if !missing.is_empty() {
        notification.push(format!(
            "Some {} could not be found: {}",
            label,
            missing.join(", ")
        ));
    }
}
