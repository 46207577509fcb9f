// src/integrations/mod.rs
//
// External Integrations Module
//
// The encoder is an external process; this side only consumes the
// results it publishes.

pub mod encoder;

pub use encoder::{
    EncoderListener, ListenerConfig, MessageOutcome, VideoEncoderCompleted, VideoEncoderError,
    VideoEncoderResult, VideoMessage, VideoMetadata,
};
