use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::invariants::validate_video;
use super::media::{
    ImageMedia, ImageType, MediaKind, ResourceID, TranscodedType, VideoMedia, VideoMediaType,
};
use crate::domain::cast_member::CastMemberID;
use crate::domain::category::CategoryID;
use crate::domain::entity::{define_identifier, AggregateRoot, Entity};
use crate::domain::genre::GenreID;
use crate::domain::validation::{Error, ValidationHandler};
use crate::domain::{DomainError, DomainResult};

define_identifier!(
    /// Identity of a video
    VideoID
);

/// Content rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "ER")]
    Er,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "10")]
    Age10,
    #[serde(rename = "12")]
    Age12,
    #[serde(rename = "14")]
    Age14,
    #[serde(rename = "16")]
    Age16,
    #[serde(rename = "18")]
    Age18,
}

/// Descriptive attributes and relations of a video, as supplied by an
/// administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub description: String,
    /// Launch year
    pub launched_at: u16,
    /// Duration in seconds
    pub duration: f64,
    pub rating: Rating,
    pub opened: bool,
    pub published: bool,
    pub categories: BTreeSet<CategoryID>,
    pub genres: BTreeSet<GenreID>,
    pub cast_members: BTreeSet<CastMemberID>,
}

/// Video aggregate root.
///
/// Owns five media slots: `video` and `trailer` go through the encoder,
/// `banner`, `thumbnail` and `thumbnail_half` are static images. Slots are
/// only reachable through the methods below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    id: VideoID,
    title: String,
    description: String,
    launched_at: u16,
    duration: f64,
    rating: Rating,
    opened: bool,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Optimistic concurrency token, bumped by the persistence collaborator
    version: u64,
    categories: BTreeSet<CategoryID>,
    genres: BTreeSet<GenreID>,
    cast_members: BTreeSet<CastMemberID>,
    video: Option<VideoMedia>,
    trailer: Option<VideoMedia>,
    banner: Option<ImageMedia>,
    thumbnail: Option<ImageMedia>,
    thumbnail_half: Option<ImageMedia>,
}

// ============================================================================
// SLOT DISPATCH
// ============================================================================

struct TranscodedSlot {
    media_type: VideoMediaType,
    get: fn(&Video) -> Option<&VideoMedia>,
    get_mut: fn(&mut Video) -> &mut Option<VideoMedia>,
}

struct ImageSlot {
    get: fn(&Video) -> Option<&ImageMedia>,
    get_mut: fn(&mut Video) -> &mut Option<ImageMedia>,
}

// Indexed by `TranscodedType`; lookup order matters: a resource id is
// matched against `video` first
static TRANSCODED_SLOTS: [TranscodedSlot; 2] = [
    TranscodedSlot {
        media_type: VideoMediaType::Video,
        get: Video::video,
        get_mut: video_slot,
    },
    TranscodedSlot {
        media_type: VideoMediaType::Trailer,
        get: Video::trailer,
        get_mut: trailer_slot,
    },
];

// Indexed by `ImageType`
static IMAGE_SLOTS: [ImageSlot; 3] = [
    ImageSlot {
        get: Video::banner,
        get_mut: banner_slot,
    },
    ImageSlot {
        get: Video::thumbnail,
        get_mut: thumbnail_slot,
    },
    ImageSlot {
        get: Video::thumbnail_half,
        get_mut: thumbnail_half_slot,
    },
];

fn video_slot(video: &mut Video) -> &mut Option<VideoMedia> {
    &mut video.video
}

fn trailer_slot(video: &mut Video) -> &mut Option<VideoMedia> {
    &mut video.trailer
}

fn banner_slot(video: &mut Video) -> &mut Option<ImageMedia> {
    &mut video.banner
}

fn thumbnail_slot(video: &mut Video) -> &mut Option<ImageMedia> {
    &mut video.thumbnail
}

fn thumbnail_half_slot(video: &mut Video) -> &mut Option<ImageMedia> {
    &mut video.thumbnail_half
}

fn transcoded_slot(slot: TranscodedType) -> &'static TranscodedSlot {
    &TRANSCODED_SLOTS[slot as usize]
}

fn image_slot(slot: ImageType) -> &'static ImageSlot {
    &IMAGE_SLOTS[slot as usize]
}

fn transcoded_slot_of(media_type: VideoMediaType) -> Option<&'static TranscodedSlot> {
    match media_type.kind() {
        MediaKind::Transcoded(slot) => Some(transcoded_slot(slot)),
        MediaKind::Image(_) => None,
    }
}

// ============================================================================
// AGGREGATE
// ============================================================================

impl Video {
    /// Create a new Video with fresh identity and timestamps.
    /// Fails with every violated rule.
    pub fn new_video(details: VideoDetails) -> DomainResult<Self> {
        let video = Self::assemble(details);
        video.self_validate()?;
        Ok(video)
    }

    /// Build without validating; callers run `validate` themselves
    pub(crate) fn assemble(details: VideoDetails) -> Self {
        let now = Utc::now();
        Self {
            id: VideoID::unique(),
            title: details.title,
            description: details.description,
            launched_at: details.launched_at,
            duration: details.duration,
            rating: details.rating,
            opened: details.opened,
            published: details.published,
            created_at: now,
            updated_at: now,
            version: 0,
            categories: details.categories,
            genres: details.genres,
            cast_members: details.cast_members,
            video: None,
            trailer: None,
            banner: None,
            thumbnail: None,
            thumbnail_half: None,
        }
    }

    /// Replace descriptive attributes and relations.
    /// Media slots are kept; nothing changes when validation fails.
    pub fn update(&mut self, details: VideoDetails) -> DomainResult<()> {
        let mut next = self.clone();
        next.title = details.title;
        next.description = details.description;
        next.launched_at = details.launched_at;
        next.duration = details.duration;
        next.rating = details.rating;
        next.opened = details.opened;
        next.published = details.published;
        next.categories = details.categories;
        next.genres = details.genres;
        next.cast_members = details.cast_members;
        next.self_validate()?;
        *self = next;
        self.touch();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Media mutation
    // ------------------------------------------------------------------------

    /// Attach the main video. Uploaded media always restarts at Pending.
    pub fn update_video_media(&mut self, media: VideoMedia) {
        self.update_transcoded_media(TranscodedType::Video, media);
    }

    /// Attach the trailer. Uploaded media always restarts at Pending.
    pub fn update_trailer_media(&mut self, media: VideoMedia) {
        self.update_transcoded_media(TranscodedType::Trailer, media);
    }

    pub fn update_banner_media(&mut self, media: ImageMedia) {
        self.update_image_media(ImageType::Banner, media);
    }

    pub fn update_thumbnail_media(&mut self, media: ImageMedia) {
        self.update_image_media(ImageType::Thumbnail, media);
    }

    pub fn update_thumbnail_half_media(&mut self, media: ImageMedia) {
        self.update_image_media(ImageType::ThumbnailHalf, media);
    }

    /// Replace a transcoded slot wholesale, resetting status to Pending
    pub fn update_transcoded_media(&mut self, slot: TranscodedType, media: VideoMedia) {
        *(transcoded_slot(slot).get_mut)(self) = Some(media.pending());
        self.touch();
    }

    /// Replace an image slot wholesale
    pub fn update_image_media(&mut self, slot: ImageType, media: ImageMedia) {
        *(image_slot(slot).get_mut)(self) = Some(media);
        self.touch();
    }

    /// Encoder started on the slot. Absent slot: no-op.
    /// Returns whether the aggregate changed.
    pub fn processing(&mut self, media_type: VideoMediaType) -> bool {
        self.transition(media_type, VideoMedia::processing)
    }

    /// Encoder finished the slot. Absent slot or duplicate completion: no-op.
    /// Returns whether the aggregate changed.
    pub fn completed(&mut self, media_type: VideoMediaType, encoded_location: &str) -> bool {
        self.transition(media_type, |media| media.completed(encoded_location))
    }

    fn transition(
        &mut self,
        media_type: VideoMediaType,
        step: impl FnOnce(&VideoMedia) -> VideoMedia,
    ) -> bool {
        let Some(slot) = transcoded_slot_of(media_type) else {
            return false;
        };
        let current = (slot.get_mut)(self);
        let Some(media) = current.as_ref() else {
            return false;
        };
        let next = step(media);
        if &next == media {
            return false;
        }
        *current = Some(next);
        self.touch();
        true
    }

    /// The transcoded slot currently holding `resource_id`, checking
    /// `video` before `trailer`
    pub fn media_type_of(&self, resource_id: &ResourceID) -> Option<VideoMediaType> {
        TRANSCODED_SLOTS
            .iter()
            .find(|slot| (slot.get)(self).is_some_and(|media| media.id() == resource_id))
            .map(|slot| slot.media_type)
    }

    /// Transcoded media held by a slot
    pub fn transcoded_media(&self, media_type: VideoMediaType) -> Option<&VideoMedia> {
        transcoded_slot_of(media_type).and_then(|slot| (slot.get)(self))
    }

    /// Storage location of the media held by a slot: the raw upload for
    /// transcoded slots, the image itself otherwise
    pub fn media_location(&self, media_type: VideoMediaType) -> Option<&str> {
        match media_type.kind() {
            MediaKind::Transcoded(slot) => {
                (transcoded_slot(slot).get)(self).map(VideoMedia::raw_location)
            }
            MediaKind::Image(slot) => (image_slot(slot).get)(self).map(ImageMedia::location),
        }
    }

    /// Ids of every stored resource referenced by this video
    pub fn resource_ids(&self) -> Vec<&ResourceID> {
        let transcoded = [&self.video, &self.trailer]
            .into_iter()
            .flatten()
            .map(VideoMedia::id);
        let images = [&self.banner, &self.thumbnail, &self.thumbnail_half]
            .into_iter()
            .flatten()
            .map(ImageMedia::id);
        transcoded.chain(images).collect()
    }

    // ------------------------------------------------------------------------
    // Persistence support
    // ------------------------------------------------------------------------

    /// Advance the concurrency token after a successful write
    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn launched_at(&self) -> u16 {
        self.launched_at
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn categories(&self) -> &BTreeSet<CategoryID> {
        &self.categories
    }

    pub fn genres(&self) -> &BTreeSet<GenreID> {
        &self.genres
    }

    pub fn cast_members(&self) -> &BTreeSet<CastMemberID> {
        &self.cast_members
    }

    pub fn video(&self) -> Option<&VideoMedia> {
        self.video.as_ref()
    }

    pub fn trailer(&self) -> Option<&VideoMedia> {
        self.trailer.as_ref()
    }

    pub fn banner(&self) -> Option<&ImageMedia> {
        self.banner.as_ref()
    }

    pub fn thumbnail(&self) -> Option<&ImageMedia> {
        self.thumbnail.as_ref()
    }

    pub fn thumbnail_half(&self) -> Option<&ImageMedia> {
        self.thumbnail_half.as_ref()
    }
}

impl Entity for Video {
    type Id = VideoID;

    fn id(&self) -> &VideoID {
        &self.id
    }

    fn validate(&self, handler: &mut dyn ValidationHandler) -> DomainResult<()> {
        validate_video(self, handler)
    }
}

impl AggregateRoot for Video {
    const NAME: &'static str = "Video";
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Er => "ER",
            Rating::L => "L",
            Rating::Age10 => "10",
            Rating::Age12 => "12",
            Rating::Age14 => "14",
            Rating::Age16 => "16",
            Rating::Age18 => "18",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rating {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ER" => Ok(Rating::Er),
            "L" => Ok(Rating::L),
            "10" | "AGE_10" => Ok(Rating::Age10),
            "12" | "AGE_12" => Ok(Rating::Age12),
            "14" | "AGE_14" => Ok(Rating::Age14),
            "16" | "AGE_16" => Ok(Rating::Age16),
            "18" | "AGE_18" => Ok(Rating::Age18),
            _ => Err(DomainError::Validation(Error::new(format!(
                "Invalid rating: {}",
                s
            )))),
        }
    }
}
