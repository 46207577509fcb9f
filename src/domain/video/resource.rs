use serde::{Deserialize, Serialize};

use super::media::VideoMediaType;

/// Raw uploaded content
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub content: Vec<u8>,
    pub content_type: String,
    pub name: String,
}

impl Resource {
    pub fn new(
        content: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
            name: name.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// Content can be large; only its size is printed
impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// Upload payload tagged with the slot it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResource {
    pub resource: Resource,
    pub media_type: VideoMediaType,
}

impl VideoResource {
    pub fn new(resource: Resource, media_type: VideoMediaType) -> Self {
        Self {
            resource,
            media_type,
        }
    }
}
