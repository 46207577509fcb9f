// src/infrastructure/media_resource_gateway.rs
//
// Media bytes for videos.
//
// Every stored upload gets its own object:
//   videoId-{video_id}/type-{MEDIA_TYPE}/{resource_id}
// so a new upload never touches the bytes the saved descriptor points at.
// The upload path discards whichever object loses: the new one when the
// record write fails, the superseded one once it succeeds.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::domain::{
    ImageMedia, Resource, ResourceID, VideoID, VideoMedia, VideoMediaType, VideoResource,
};
use crate::error::AppResult;
use crate::infrastructure::storage::StorageService;

#[cfg_attr(test, mockall::automock)]
pub trait MediaResourceGateway: Send + Sync {
    /// Store transcodable bytes; the descriptor starts Pending
    fn store_video(&self, video_id: &VideoID, resource: &VideoResource) -> AppResult<VideoMedia>;

    fn store_image(&self, video_id: &VideoID, resource: &VideoResource) -> AppResult<ImageMedia>;

    /// An object stored for the slot, first by name. The upload path keeps
    /// at most one per slot once its record write settles.
    fn get_resource(
        &self,
        video_id: &VideoID,
        media_type: VideoMediaType,
    ) -> AppResult<Option<Resource>>;

    /// The object a descriptor points at
    fn get_resource_at(&self, location: &str) -> AppResult<Option<Resource>>;

    /// Remove one stored object; unknown locations are ignored
    fn delete_resource(&self, location: &str) -> AppResult<()>;

    /// Release every stored object of a video
    fn clear_resources(&self, video_id: &VideoID) -> AppResult<()>;
}

pub struct DefaultMediaResourceGateway {
    storage: Arc<dyn StorageService>,
}

impl DefaultMediaResourceGateway {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }

    fn folder(video_id: &VideoID) -> String {
        format!("videoId-{}", video_id)
    }

    fn slot_folder(video_id: &VideoID, media_type: VideoMediaType) -> String {
        format!("{}/type-{}", Self::folder(video_id), media_type)
    }

    /// Store the bytes under a fresh resource id.
    /// Returns (id, location, checksum).
    fn store(
        &self,
        video_id: &VideoID,
        resource: &VideoResource,
    ) -> AppResult<(ResourceID, String, String)> {
        let id = ResourceID::unique();
        let location = format!("{}/{}", Self::slot_folder(video_id, resource.media_type), id);
        self.storage.store(&location, &resource.resource)?;
        Ok((id, location, checksum(&resource.resource.content)))
    }
}

impl MediaResourceGateway for DefaultMediaResourceGateway {
    fn store_video(&self, video_id: &VideoID, resource: &VideoResource) -> AppResult<VideoMedia> {
        let (id, location, checksum) = self.store(video_id, resource)?;
        Ok(VideoMedia::new(
            id,
            checksum,
            resource.resource.name.clone(),
            location,
        ))
    }

    fn store_image(&self, video_id: &VideoID, resource: &VideoResource) -> AppResult<ImageMedia> {
        let (id, location, checksum) = self.store(video_id, resource)?;
        Ok(ImageMedia::new(
            id,
            checksum,
            resource.resource.name.clone(),
            location,
        ))
    }

    fn get_resource(
        &self,
        video_id: &VideoID,
        media_type: VideoMediaType,
    ) -> AppResult<Option<Resource>> {
        let prefix = format!("{}/", Self::slot_folder(video_id, media_type));
        match self.storage.list(&prefix)?.first() {
            Some(name) => self.storage.get(name),
            None => Ok(None),
        }
    }

    fn get_resource_at(&self, location: &str) -> AppResult<Option<Resource>> {
        self.storage.get(location)
    }

    fn delete_resource(&self, location: &str) -> AppResult<()> {
        self.storage.delete_all(&[location.to_string()])
    }

    fn clear_resources(&self, video_id: &VideoID) -> AppResult<()> {
        let prefix = format!("{}/", Self::folder(video_id));
        let names = self.storage.list(&prefix)?;
        self.storage.delete_all(&names)
    }
}

/// Lowercase hex SHA-256 of the content
pub fn checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaStatus;
    use crate::infrastructure::storage::{InMemoryStorageService, MockStorageService};
    use crate::error::AppError;

    fn resource(media_type: VideoMediaType) -> VideoResource {
        VideoResource::new(
            Resource::new(b"hello".to_vec(), "video/mp4", "clip.mp4"),
            media_type,
        )
    }

    #[test]
    fn test_checksum_is_sha256_hex() {
        assert_eq!(
            checksum(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_store_video_returns_pending_descriptor() {
        let storage = Arc::new(InMemoryStorageService::new());
        let gateway = DefaultMediaResourceGateway::new(storage.clone());
        let video_id = VideoID::from("v1");

        let media = gateway
            .store_video(&video_id, &resource(VideoMediaType::Video))
            .unwrap();

        assert_eq!(media.status(), MediaStatus::Pending);
        assert_eq!(
            media.raw_location(),
            format!("videoId-v1/type-VIDEO/{}", media.id())
        );
        assert_eq!(media.name(), "clip.mp4");
        assert_eq!(media.checksum(), checksum(b"hello"));
        assert!(storage.get(media.raw_location()).unwrap().is_some());
    }

    #[test]
    fn test_each_store_gets_its_own_object() {
        let gateway = DefaultMediaResourceGateway::new(Arc::new(InMemoryStorageService::new()));
        let video_id = VideoID::from("v1");

        let first = gateway
            .store_image(&video_id, &resource(VideoMediaType::Banner))
            .unwrap();
        let second = gateway
            .store_image(&video_id, &resource(VideoMediaType::Banner))
            .unwrap();

        assert_ne!(first.id(), second.id());
        assert_ne!(first.location(), second.location());

        gateway.delete_resource(first.location()).unwrap();
        assert!(gateway.get_resource_at(first.location()).unwrap().is_none());
        assert!(gateway.get_resource_at(second.location()).unwrap().is_some());
        assert!(gateway
            .get_resource(&video_id, VideoMediaType::Banner)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_clear_resources_only_touches_one_video() {
        let storage = Arc::new(InMemoryStorageService::new());
        let gateway = DefaultMediaResourceGateway::new(storage.clone());
        let one = VideoID::from("v1");
        let other = VideoID::from("v10");

        gateway.store_video(&one, &resource(VideoMediaType::Video)).unwrap();
        gateway.store_image(&one, &resource(VideoMediaType::Thumbnail)).unwrap();
        gateway.store_video(&other, &resource(VideoMediaType::Trailer)).unwrap();

        gateway.clear_resources(&one).unwrap();

        assert!(gateway
            .get_resource(&one, VideoMediaType::Video)
            .unwrap()
            .is_none());
        assert!(gateway
            .get_resource(&other, VideoMediaType::Trailer)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_storage_failure_is_propagated() {
        let mut storage = MockStorageService::new();
        storage
            .expect_store()
            .returning(|_, _| Err(AppError::Storage("disk full".to_string())));
        let gateway = DefaultMediaResourceGateway::new(Arc::new(storage));

        let result = gateway.store_video(&VideoID::from("v1"), &resource(VideoMediaType::Video));
        assert!(matches!(result, Err(AppError::Storage(m)) if m == "disk full"));
    }
}
