// src/integrations/encoder/messages.rs
//
// JSON results published by the encoder.
//
// Completed:
//   {"status":"COMPLETED","id":"<video id>","output_bucket":"...",
//    "video":{"resource_id":"...","encoded_video_folder":"...","file_path":"..."}}
// Error:
//   {"status":"ERROR","message":{"resource_id":"...","file_path":"..."},"error":"..."}

use serde::{Deserialize, Serialize};

use crate::domain::{MediaStatus, ResourceID, VideoID};
use crate::error::AppResult;
use crate::services::UpdateMediaStatusRequest;

/// One encoder result, discriminated by `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum VideoEncoderResult {
    #[serde(rename = "COMPLETED", alias = "completed")]
    Completed(VideoEncoderCompleted),

    #[serde(rename = "ERROR", alias = "error")]
    Error(VideoEncoderError),
}

impl VideoEncoderResult {
    pub fn from_json(payload: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEncoderCompleted {
    /// Id of the video the encoded resource belongs to
    pub id: String,
    #[serde(default)]
    pub output_bucket: String,
    pub video: VideoMetadata,
}

impl VideoEncoderCompleted {
    /// Reconciliation request marking the resource as Completed
    pub fn to_request(&self) -> UpdateMediaStatusRequest {
        UpdateMediaStatusRequest {
            status: MediaStatus::Completed,
            video_id: VideoID::new(self.id.clone()),
            resource_id: ResourceID::new(self.video.resource_id.clone()),
            folder: self.video.encoded_video_folder.clone(),
            filename: self.video.file_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub encoded_video_folder: String,
    pub resource_id: String,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEncoderError {
    pub message: VideoMessage,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMessage {
    pub resource_id: String,
    pub file_path: String,
}
