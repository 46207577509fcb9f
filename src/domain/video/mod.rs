pub mod entity;
pub mod invariants;
pub mod media;
pub mod resource;

pub use entity::{Rating, Video, VideoDetails, VideoID};
pub use invariants::validate_video;
pub use media::{
    ImageMedia, ImageType, MediaKind, MediaStatus, ResourceID, TranscodedType, VideoMedia,
    VideoMediaType,
};
pub use resource::{Resource, VideoResource};
