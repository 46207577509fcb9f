// src/domain/video/media.rs
//
// Media descriptors attached to a Video.
//
// INVARIANTS:
// - MediaStatus only moves forward: Pending -> Processing -> Completed
// - encoded_location is set exactly when status is Completed
// - Once Completed, the descriptor never changes again

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::entity::define_identifier;
use crate::domain::validation::Error;
use crate::domain::DomainError;

define_identifier!(
    /// Identifier assigned by the storage collaborator to a stored asset
    ResourceID
);

/// Encoding status of a transcoded asset, ordered by progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Pending,
    Processing,
    Completed,
}

/// Descriptor of an asset that goes through the encoder (main video, trailer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMedia {
    id: ResourceID,
    checksum: String,
    name: String,
    raw_location: String,
    encoded_location: Option<String>,
    status: MediaStatus,
}

impl VideoMedia {
    /// Freshly stored media, waiting for the encoder
    pub fn new(
        id: ResourceID,
        checksum: impl Into<String>,
        name: impl Into<String>,
        raw_location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            checksum: checksum.into(),
            name: name.into(),
            raw_location: raw_location.into(),
            encoded_location: None,
            status: MediaStatus::Pending,
        }
    }

    /// Rebuild a descriptor in any state (persistence collaborators, tests)
    pub fn with(
        id: ResourceID,
        checksum: impl Into<String>,
        name: impl Into<String>,
        raw_location: impl Into<String>,
        encoded_location: Option<String>,
        status: MediaStatus,
    ) -> Self {
        Self {
            id,
            checksum: checksum.into(),
            name: name.into(),
            raw_location: raw_location.into(),
            encoded_location,
            status,
        }
    }

    /// Same asset, back at the start of the pipeline
    pub fn pending(&self) -> Self {
        Self {
            encoded_location: None,
            status: MediaStatus::Pending,
            ..self.clone()
        }
    }

    /// Encoder picked the asset up. Never moves a completed asset backwards.
    pub fn processing(&self) -> Self {
        if self.status >= MediaStatus::Processing {
            return self.clone();
        }
        Self {
            status: MediaStatus::Processing,
            ..self.clone()
        }
    }

    /// Encoder finished. A second completion keeps the first location.
    pub fn completed(&self, encoded_location: impl Into<String>) -> Self {
        if self.status == MediaStatus::Completed {
            return self.clone();
        }
        Self {
            encoded_location: Some(encoded_location.into()),
            status: MediaStatus::Completed,
            ..self.clone()
        }
    }

    pub fn id(&self) -> &ResourceID {
        &self.id
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_location(&self) -> &str {
        &self.raw_location
    }

    pub fn encoded_location(&self) -> Option<&str> {
        self.encoded_location.as_deref()
    }

    pub fn status(&self) -> MediaStatus {
        self.status
    }
}

/// Descriptor of a static image. Images are stored, never transcoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMedia {
    id: ResourceID,
    checksum: String,
    name: String,
    location: String,
}

impl ImageMedia {
    pub fn new(
        id: ResourceID,
        checksum: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            checksum: checksum.into(),
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn id(&self) -> &ResourceID {
        &self.id
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Which of the five media slots of a Video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoMediaType {
    Video,
    Trailer,
    Banner,
    Thumbnail,
    ThumbnailHalf,
}

/// Slots whose media goes through the encoder, in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscodedType {
    Video,
    Trailer,
}

/// Slots holding static images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Banner,
    Thumbnail,
    ThumbnailHalf,
}

/// Whether a slot holds transcoded media or a static image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Transcoded(TranscodedType),
    Image(ImageType),
}

impl TranscodedType {
    pub fn media_type(self) -> VideoMediaType {
        match self {
            TranscodedType::Video => VideoMediaType::Video,
            TranscodedType::Trailer => VideoMediaType::Trailer,
        }
    }
}

impl ImageType {
    pub fn media_type(self) -> VideoMediaType {
        match self {
            ImageType::Banner => VideoMediaType::Banner,
            ImageType::Thumbnail => VideoMediaType::Thumbnail,
            ImageType::ThumbnailHalf => VideoMediaType::ThumbnailHalf,
        }
    }
}

impl VideoMediaType {
    pub const ALL: [VideoMediaType; 5] = [
        VideoMediaType::Video,
        VideoMediaType::Trailer,
        VideoMediaType::Banner,
        VideoMediaType::Thumbnail,
        VideoMediaType::ThumbnailHalf,
    ];

    pub fn kind(&self) -> MediaKind {
        match self {
            VideoMediaType::Video => MediaKind::Transcoded(TranscodedType::Video),
            VideoMediaType::Trailer => MediaKind::Transcoded(TranscodedType::Trailer),
            VideoMediaType::Banner => MediaKind::Image(ImageType::Banner),
            VideoMediaType::Thumbnail => MediaKind::Image(ImageType::Thumbnail),
            VideoMediaType::ThumbnailHalf => MediaKind::Image(ImageType::ThumbnailHalf),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoMediaType::Video => "VIDEO",
            VideoMediaType::Trailer => "TRAILER",
            VideoMediaType::Banner => "BANNER",
            VideoMediaType::Thumbnail => "THUMBNAIL",
            VideoMediaType::ThumbnailHalf => "THUMBNAIL_HALF",
        }
    }
}

impl std::fmt::Display for VideoMediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VideoMediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoMediaType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::Validation(Error::new(format!("Invalid media type: {}", s))))
    }
}

impl std::fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaStatus::Pending => write!(f, "PENDING"),
            MediaStatus::Processing => write!(f, "PROCESSING"),
            MediaStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media() -> VideoMedia {
        VideoMedia::new(ResourceID::from("R1"), "abc", "video.mp4", "videoId-1/type-VIDEO")
    }

    #[test]
    fn test_new_media_is_pending() {
        let media = media();
        assert_eq!(media.status(), MediaStatus::Pending);
        assert!(media.encoded_location().is_none());
    }

    #[test]
    fn test_status_moves_forward() {
        let processing = media().processing();
        assert_eq!(processing.status(), MediaStatus::Processing);

        let completed = processing.completed("encoded/video.mp4");
        assert_eq!(completed.status(), MediaStatus::Completed);
        assert_eq!(completed.encoded_location(), Some("encoded/video.mp4"));
    }

    #[test]
    fn test_completed_never_goes_backwards() {
        let completed = media().completed("first/location.mp4");
        assert_eq!(completed.processing(), completed);

        let again = completed.completed("second/location.mp4");
        assert_eq!(again.encoded_location(), Some("first/location.mp4"));
    }

    #[test]
    fn test_pending_clears_encoded_location() {
        let reset = media().completed("x/y.mp4").pending();
        assert_eq!(reset.status(), MediaStatus::Pending);
        assert!(reset.encoded_location().is_none());
        assert_eq!(reset.id().to_string(), "R1");
    }

    #[test]
    fn test_media_type_parsing() {
        assert_eq!(
            "thumbnail_half".parse::<VideoMediaType>().unwrap(),
            VideoMediaType::ThumbnailHalf
        );
        assert!("poster".parse::<VideoMediaType>().is_err());
        assert_eq!(
            VideoMediaType::Trailer.kind(),
            MediaKind::Transcoded(TranscodedType::Trailer)
        );
        assert_eq!(VideoMediaType::Banner.kind(), MediaKind::Image(ImageType::Banner));
    }

    #[test]
    fn test_kind_round_trips_to_media_type() {
        for media_type in VideoMediaType::ALL {
            let back = match media_type.kind() {
                MediaKind::Transcoded(slot) => slot.media_type(),
                MediaKind::Image(slot) => slot.media_type(),
            };
            assert_eq!(back, media_type);
        }
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&MediaStatus::Processing).unwrap(),
            "\"PROCESSING\""
        );
        assert_eq!(
            serde_json::to_string(&VideoMediaType::ThumbnailHalf).unwrap(),
            "\"THUMBNAIL_HALF\""
        );
    }
}
