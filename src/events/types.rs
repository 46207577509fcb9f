// src/events/types.rs
//
// Domain events of the media catalog.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{MediaStatus, ResourceID, VideoID, VideoMediaType};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// VIDEO LIFECYCLE EVENTS
// ============================================================================

/// Emitted after a new video is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub video_id: VideoID,
    pub title: String,
}

impl VideoCreated {
    pub fn new(video_id: VideoID, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            video_id,
            title,
        }
    }
}

impl DomainEvent for VideoCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VideoCreated" }
}

/// Emitted after a video and its stored media are removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub video_id: VideoID,
}

impl VideoDeleted {
    pub fn new(video_id: VideoID) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            video_id,
        }
    }
}

impl DomainEvent for VideoDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VideoDeleted" }
}

// ============================================================================
// MEDIA EVENTS
// ============================================================================

/// Emitted when raw transcodable media (VIDEO or TRAILER) is stored and
/// attached. This is the signal for the encoder to pick the file up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMediaCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub video_id: VideoID,
    pub resource_id: ResourceID,
    pub file_path: String,
}

impl VideoMediaCreated {
    pub fn new(video_id: VideoID, resource_id: ResourceID, file_path: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            video_id,
            resource_id,
            file_path,
        }
    }
}

impl DomainEvent for VideoMediaCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VideoMediaCreated" }
}

/// Emitted only when a status transition actually happened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMediaStatusChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub video_id: VideoID,
    pub resource_id: ResourceID,
    pub media_type: VideoMediaType,
    pub status: MediaStatus,
}

impl VideoMediaStatusChanged {
    pub fn new(
        video_id: VideoID,
        resource_id: ResourceID,
        media_type: VideoMediaType,
        status: MediaStatus,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            video_id,
            resource_id,
            media_type,
            status,
        }
    }
}

impl DomainEvent for VideoMediaStatusChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VideoMediaStatusChanged" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_get_distinct_ids() {
        let a = VideoDeleted::new(VideoID::from("v1"));
        let b = VideoDeleted::new(VideoID::from("v1"));
        assert_ne!(a.event_id(), b.event_id());
        assert_eq!(a.event_type(), "VideoDeleted");
    }

    #[test]
    fn test_status_changed_serializes_wire_names() {
        let event = VideoMediaStatusChanged::new(
            VideoID::from("v1"),
            ResourceID::from("r1"),
            VideoMediaType::Trailer,
            MediaStatus::Completed,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["media_type"], "TRAILER");
        assert_eq!(json["status"], "COMPLETED");
        assert_eq!(json["video_id"], "v1");
    }
}
