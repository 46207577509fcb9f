// src/application/commands.rs
//
// Catalog Commands - Line Protocol
//
// CRITICAL RULES:
// - A JSON object carrying a "command" field is a catalog command
// - Every other line is an encoder result and belongs to the listener
// - Uploads read their bytes from a local file path
// - Every command produces exactly one reply line

use std::collections::BTreeSet;
use std::path::PathBuf;

use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::{
    CastMemberID, CategoryID, GenreID, Rating, Resource, Video, VideoID, VideoMediaType,
    VideoResource,
};
use crate::error::{AppError, AppResult};
use crate::infrastructure::checksum;
use crate::services::{CreateVideoRequest, UploadMediaRequest};

use super::error_handling::ToErrorResponse;
use super::state::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CatalogCommand {
    CreateVideo {
        title: String,
        description: String,
        launched_at: u16,
        duration: f64,
        rating: Rating,
        #[serde(default)]
        opened: bool,
        #[serde(default)]
        published: bool,
        #[serde(default)]
        categories: BTreeSet<CategoryID>,
        #[serde(default)]
        genres: BTreeSet<GenreID>,
        #[serde(default)]
        cast_members: BTreeSet<CastMemberID>,
    },
    UploadMedia {
        video_id: VideoID,
        media_type: VideoMediaType,
        path: PathBuf,
        #[serde(default)]
        content_type: Option<String>,
    },
    GetMedia {
        video_id: VideoID,
        media_type: VideoMediaType,
    },
    ShowVideo {
        video_id: VideoID,
    },
    DeleteVideo {
        video_id: VideoID,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum CommandReply {
    VideoCreated {
        id: VideoID,
    },
    MediaUploaded {
        video_id: VideoID,
        media_type: VideoMediaType,
    },
    Media {
        video_id: VideoID,
        media_type: VideoMediaType,
        name: String,
        content_type: String,
        size: usize,
        checksum: String,
    },
    Video {
        video: Video,
    },
    VideoDeleted {
        id: VideoID,
    },
}

#[derive(Serialize)]
struct Reply<'a> {
    success: bool,
    #[serde(flatten)]
    reply: &'a CommandReply,
}

/// `None` when the line is not a command and should go to the encoder
/// listener; `Some(Err)` when it is a command with bad fields.
pub fn parse_line(line: &str) -> Option<AppResult<CatalogCommand>> {
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    value.get("command")?;

    Some(
        serde_json::from_value(value)
            .map_err(|e| AppError::Other(format!("Invalid command: {}", e))),
    )
}

/// One JSON line: the reply, or the caller-facing error
pub fn render_reply(result: AppResult<CommandReply>) -> String {
    match result.to_error_response() {
        Ok(reply) => serde_json::to_string(&Reply {
            success: true,
            reply: &reply,
        })
        .map_err(AppError::from)
        .to_error_response()
        .unwrap_or_else(|error| error),
        Err(error) => error,
    }
}

impl AppState {
    /// Run one catalog command against the wired services
    pub fn run_command(&self, command: CatalogCommand) -> AppResult<CommandReply> {
        match command {
            CatalogCommand::CreateVideo {
                title,
                description,
                launched_at,
                duration,
                rating,
                opened,
                published,
                categories,
                genres,
                cast_members,
            } => {
                let created = self.create_video_service.execute(CreateVideoRequest {
                    title,
                    description,
                    launched_at,
                    duration,
                    rating,
                    opened,
                    published,
                    categories,
                    genres,
                    cast_members,
                    video: None,
                    trailer: None,
                    banner: None,
                    thumbnail: None,
                    thumbnail_half: None,
                })?;
                Ok(CommandReply::VideoCreated { id: created.id })
            }

            CatalogCommand::UploadMedia {
                video_id,
                media_type,
                path,
                content_type,
            } => {
                let content = std::fs::read(&path)?;
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                info!(
                    "[COMMAND] Uploading {} as {} of video {}",
                    path.display(),
                    media_type,
                    video_id
                );

                let resource = Resource::new(
                    content,
                    content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
                    name,
                );
                let uploaded = self.upload_media_service.execute(UploadMediaRequest {
                    video_id,
                    resource: VideoResource::new(resource, media_type),
                })?;
                Ok(CommandReply::MediaUploaded {
                    video_id: uploaded.video_id,
                    media_type: uploaded.media_type,
                })
            }

            CatalogCommand::GetMedia {
                video_id,
                media_type,
            } => {
                let resource = self.get_media_service.execute(&video_id, media_type)?;
                Ok(CommandReply::Media {
                    video_id,
                    media_type,
                    size: resource.len(),
                    checksum: checksum(&resource.content),
                    name: resource.name,
                    content_type: resource.content_type,
                })
            }

            CatalogCommand::ShowVideo { video_id } => {
                let video = self
                    .gateways
                    .videos
                    .find_by_id(&video_id)?
                    .ok_or_else(|| AppError::not_found("Video", &video_id))?;
                Ok(CommandReply::Video { video })
            }

            CatalogCommand::DeleteVideo { video_id } => {
                self.delete_video_service.execute(&video_id)?;
                Ok(CommandReply::VideoDeleted { id: video_id })
            }
        }
    }
}
