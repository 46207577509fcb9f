// src/repositories/video_repository.rs
//
// Video persistence contract and the in-memory store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{Entity, Video, VideoID};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait VideoGateway: Send + Sync {
    fn create(&self, video: Video) -> AppResult<Video>;

    /// Full-state replace. Fails with `Conflict` when the stored version
    /// differs from the one the caller loaded.
    fn update(&self, video: Video) -> AppResult<Video>;

    fn find_by_id(&self, id: &VideoID) -> AppResult<Option<Video>>;

    /// Removing an unknown id succeeds
    fn delete_by_id(&self, id: &VideoID) -> AppResult<()>;

    fn exists_by_id(&self, id: &VideoID) -> AppResult<bool>;
}

/// Video store backed by a map.
///
/// Writes for one id are serialized by the lock and checked against the
/// version token, which gives the single-writer-per-aggregate discipline
/// the use cases rely on.
#[derive(Default)]
pub struct InMemoryVideoGateway {
    videos: RwLock<HashMap<VideoID, Video>>,
}

impl InMemoryVideoGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<VideoID, Video>> {
        self.videos.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<VideoID, Video>> {
        self.videos.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VideoGateway for InMemoryVideoGateway {
    fn create(&self, video: Video) -> AppResult<Video> {
        let mut videos = self.write();
        if videos.contains_key(video.id()) {
            return Err(AppError::Conflict(format!(
                "Video with ID {} already exists",
                video.id()
            )));
        }
        videos.insert(video.id().clone(), video.clone());
        Ok(video)
    }

    fn update(&self, mut video: Video) -> AppResult<Video> {
        let mut videos = self.write();
        let stored = videos
            .get(video.id())
            .ok_or_else(|| AppError::not_found("Video", video.id()))?;

        if stored.version() != video.version() {
            return Err(AppError::Conflict(format!(
                "Video with ID {} was modified concurrently (expected version {}, found {})",
                video.id(),
                video.version(),
                stored.version()
            )));
        }

        video.increment_version();
        videos.insert(video.id().clone(), video.clone());
        Ok(video)
    }

    fn find_by_id(&self, id: &VideoID) -> AppResult<Option<Video>> {
        Ok(self.read().get(id).cloned())
    }

    fn delete_by_id(&self, id: &VideoID) -> AppResult<()> {
        self.write().remove(id);
        Ok(())
    }

    fn exists_by_id(&self, id: &VideoID) -> AppResult<bool> {
        Ok(self.read().contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::{Rating, VideoDetails};

    fn video() -> Video {
        Video::new_video(VideoDetails {
            title: "Title".to_string(),
            description: "Description".to_string(),
            launched_at: 2020,
            duration: 60.0,
            rating: Rating::Age12,
            opened: true,
            published: true,
            categories: BTreeSet::new(),
            genres: BTreeSet::new(),
            cast_members: BTreeSet::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_create_then_find() {
        let gateway = InMemoryVideoGateway::new();
        let video = gateway.create(video()).unwrap();

        let found = gateway.find_by_id(video.id()).unwrap().unwrap();
        assert_eq!(found, video);
        assert!(gateway.exists_by_id(video.id()).unwrap());
        assert!(gateway.create(video).is_err());
    }

    #[test]
    fn test_update_bumps_version() {
        let gateway = InMemoryVideoGateway::new();
        let video = gateway.create(video()).unwrap();

        let updated = gateway.update(video.clone()).unwrap();
        assert_eq!(updated.version(), 1);
        assert_eq!(
            gateway.find_by_id(video.id()).unwrap().unwrap().version(),
            1
        );
    }

    #[test]
    fn test_stale_update_is_rejected() {
        let gateway = InMemoryVideoGateway::new();
        let video = gateway.create(video()).unwrap();

        let first = video.clone();
        let second = video.clone();
        gateway.update(first).unwrap();

        match gateway.update(second) {
            Err(AppError::Conflict(message)) => assert!(message.contains("concurrently")),
            other => panic!("Expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_update_unknown_video_is_not_found() {
        let gateway = InMemoryVideoGateway::new();
        assert!(matches!(
            gateway.update(video()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let gateway = InMemoryVideoGateway::new();
        let video = gateway.create(video()).unwrap();

        gateway.delete_by_id(video.id()).unwrap();
        gateway.delete_by_id(video.id()).unwrap();
        assert!(gateway.is_empty());
    }
}
