// src/integrations/encoder/mod.rs
//
// Encoder result consumption: wire messages and the queue listener.

pub mod listener;
pub mod messages;

pub use listener::{EncoderListener, ListenerConfig, MessageOutcome};
pub use messages::{
    VideoEncoderCompleted, VideoEncoderError, VideoEncoderResult, VideoMessage, VideoMetadata,
};
