// src/integrations/encoder/listener.rs
//
// Encoder Listener - Background consumption of encoder results
//
// CRITICAL RULES:
// - Runs in a background task fed by a bounded channel
// - Decodes every payload independently
// - COMPLETED results go through UpdateMediaStatusService
// - ERROR results are logged only; no aggregate changes
// - A failing message NEVER stops consumption of later ones
// - Reconciliation is blocking work and runs on the blocking pool, never
//   on a runtime worker

use std::sync::{Arc, Mutex};

use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::VideoMediaType;
use crate::services::{StatusUpdateOutcome, UpdateMediaStatusService};

use super::messages::VideoEncoderResult;

#[derive(Debug, Clone, Default)]
pub struct ListenerConfig {
    /// Log raw payloads at debug level
    pub log_payloads: bool,
}

/// What happened to one consumed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    Applied(VideoMediaType),
    Unchanged(VideoMediaType),
    /// Valid message for a resource no video slot holds
    Discarded,
    /// The encoder reported a failure
    EncodingFailed,
    /// Payload could not be decoded
    Malformed,
    /// Reconciliation failed (missing video, storage, conflict)
    Failed,
}

/// Decodes and applies single messages; shared with the background task
#[derive(Clone)]
struct MessageHandler {
    service: Arc<UpdateMediaStatusService>,
    config: ListenerConfig,
}

impl MessageHandler {
    fn handle(&self, payload: &str) -> MessageOutcome {
        if self.config.log_payloads {
            debug!("[ENCODER] Payload: {}", payload);
        }

        let result = match VideoEncoderResult::from_json(payload) {
            Ok(result) => result,
            Err(e) => {
                warn!("[ENCODER] Dropping malformed message: {}", e);
                return MessageOutcome::Malformed;
            }
        };

        match result {
            VideoEncoderResult::Completed(completed) => {
                match self.service.execute(completed.to_request()) {
                    Ok(StatusUpdateOutcome::Applied(media_type)) => {
                        MessageOutcome::Applied(media_type)
                    }
                    Ok(StatusUpdateOutcome::Unchanged(media_type)) => {
                        MessageOutcome::Unchanged(media_type)
                    }
                    Ok(StatusUpdateOutcome::Discarded) => MessageOutcome::Discarded,
                    Err(e) => {
                        error!(
                            "[ENCODER] Could not apply result for video {}: {}",
                            completed.id, e
                        );
                        MessageOutcome::Failed
                    }
                }
            }
            VideoEncoderResult::Error(failure) => {
                error!(
                    "[ENCODER] Encoding failed for resource {} ({}): {}",
                    failure.message.resource_id, failure.message.file_path, failure.error
                );
                MessageOutcome::EncodingFailed
            }
        }
    }
}

pub struct EncoderListener {
    handler: MessageHandler,
    task_handle: Arc<Mutex<Option<JoinHandle<usize>>>>,
}

impl EncoderListener {
    pub fn new(service: Arc<UpdateMediaStatusService>, config: ListenerConfig) -> Self {
        Self {
            handler: MessageHandler { service, config },
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Process one raw payload synchronously
    pub fn handle_message(&self, payload: &str) -> MessageOutcome {
        self.handler.handle(payload)
    }

    /// Consume `receiver` in a background task until every sender is
    /// dropped. A previous consumer is stopped first.
    pub fn start(&self, receiver: mpsc::Receiver<String>) {
        self.stop();

        let handler = self.handler.clone();
        let task = tokio::spawn(async move { consume(handler, receiver).await });

        let mut handle = self.task_handle.lock().unwrap_or_else(|p| p.into_inner());
        *handle = Some(task);
    }

    pub fn stop(&self) {
        let mut handle = self.task_handle.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(task) = handle.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task_handle
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Wait for the background task to drain its channel.
    /// Returns how many messages it consumed (0 when never started).
    pub async fn join(&self) -> usize {
        let task = self
            .task_handle
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take();

        match task {
            Some(task) => task.await.unwrap_or_else(|e| {
                warn!("[ENCODER] Listener task ended abnormally: {}", e);
                0
            }),
            None => 0,
        }
    }
}

impl Drop for EncoderListener {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn consume(handler: MessageHandler, mut receiver: mpsc::Receiver<String>) -> usize {
    info!("[ENCODER] Listener started");
    let mut consumed = 0;

    while let Some(payload) = receiver.recv().await {
        let worker = handler.clone();
        let outcome = tokio::task::spawn_blocking(move || worker.handle(&payload))
            .await
            .unwrap_or_else(|e| {
                error!("[ENCODER] Message {} handler aborted: {}", consumed, e);
                MessageOutcome::Failed
            });
        debug!("[ENCODER] Message {} -> {:?}", consumed, outcome);
        consumed += 1;
    }

    info!("[ENCODER] Listener stopped after {} messages", consumed);
    consumed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entity, MediaStatus, ResourceID, Video, VideoDetails, VideoID, VideoMedia};
    use crate::error::AppResult;
    use crate::events::EventBus;
    use crate::repositories::{InMemoryVideoGateway, MockVideoGateway, VideoGateway};
    use std::collections::BTreeSet;
    use std::time::{Duration, Instant};

    fn seeded() -> (Arc<InMemoryVideoGateway>, Video) {
        let gateway = Arc::new(InMemoryVideoGateway::new());
        let mut video = Video::new_video(VideoDetails {
            title: "Encoded".to_string(),
            description: "Waiting for the encoder".to_string(),
            launched_at: 2024,
            duration: 10.0,
            rating: crate::domain::Rating::L,
            opened: false,
            published: false,
            categories: BTreeSet::new(),
            genres: BTreeSet::new(),
            cast_members: BTreeSet::new(),
        })
        .unwrap();
        video.update_video_media(VideoMedia::new(
            ResourceID::from("R1"),
            "checksum",
            "video.mp4",
            "raw/video.mp4",
        ));
        let video = gateway.create(video).unwrap();
        (gateway, video)
    }

    fn listener(gateway: Arc<dyn VideoGateway>) -> EncoderListener {
        let service = UpdateMediaStatusService::new(gateway, Arc::new(EventBus::new()));
        EncoderListener::new(Arc::new(service), ListenerConfig::default())
    }

    fn completed(video_id: &str, resource_id: &str) -> String {
        format!(
            r#"{{"status":"COMPLETED","id":"{}","output_bucket":"b","video":{{"resource_id":"{}","encoded_video_folder":"f","file_path":"n.mp4"}}}}"#,
            video_id, resource_id
        )
    }

    #[test]
    fn test_handle_message_outcomes() {
        let (gateway, video) = seeded();
        let listener = listener(gateway.clone());
        let id = video.id().to_string();

        assert_eq!(
            listener.handle_message(&completed(&id, "R1")),
            MessageOutcome::Applied(VideoMediaType::Video)
        );
        assert_eq!(
            listener.handle_message(&completed(&id, "R1")),
            MessageOutcome::Unchanged(VideoMediaType::Video)
        );
        assert_eq!(
            listener.handle_message(&completed(&id, "R2")),
            MessageOutcome::Discarded
        );
        assert_eq!(
            listener.handle_message(&completed("missing", "R1")),
            MessageOutcome::Failed
        );
        assert_eq!(listener.handle_message("not json"), MessageOutcome::Malformed);
        assert_eq!(
            listener.handle_message(
                r#"{"status":"ERROR","message":{"resource_id":"R1","file_path":"p"},"error":"boom"}"#
            ),
            MessageOutcome::EncodingFailed
        );
    }

    #[tokio::test]
    async fn test_bad_messages_do_not_stop_consumption() {
        let (gateway, video) = seeded();
        let listener = listener(gateway.clone());
        let (tx, rx) = mpsc::channel(8);

        listener.start(rx);

        tx.send("{ garbage".to_string()).await.unwrap();
        tx.send(completed("missing", "R1")).await.unwrap();
        tx.send(completed(&video.id().to_string(), "R1")).await.unwrap();
        drop(tx);

        assert_eq!(listener.join().await, 3);

        let stored = gateway.find_by_id(video.id()).unwrap().unwrap();
        let media = stored.video().unwrap();
        assert_eq!(media.status(), MediaStatus::Completed);
        assert_eq!(media.encoded_location(), Some("f/n.mp4"));
    }

    #[tokio::test]
    async fn test_stop_aborts_consumer() {
        let (gateway, _) = seeded();
        let listener = listener(gateway);
        let (_tx, rx) = mpsc::channel::<String>(1);

        listener.start(rx);
        assert!(listener.is_running());

        listener.stop();
        assert!(!listener.is_running());
        assert_eq!(listener.join().await, 0);
    }

    #[tokio::test]
    async fn test_slow_reconciliation_leaves_runtime_responsive() {
        let mut gateway = MockVideoGateway::new();
        gateway.expect_find_by_id().returning(|_| {
            std::thread::sleep(Duration::from_millis(400));
            Ok(None)
        });
        let listener = listener(Arc::new(gateway));
        let (tx, rx) = mpsc::channel(1);

        listener.start(rx);
        tx.send(completed("slow", "R1")).await.unwrap();

        let started = Instant::now();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(started.elapsed() < Duration::from_millis(300));

        drop(tx);
        assert_eq!(listener.join().await, 1);
    }

    /// Panics on reads of one video; delegates everything else
    struct PanickingGateway {
        inner: Arc<InMemoryVideoGateway>,
        poisoned: String,
    }

    impl VideoGateway for PanickingGateway {
        fn create(&self, video: Video) -> AppResult<Video> {
            self.inner.create(video)
        }

        fn update(&self, video: Video) -> AppResult<Video> {
            self.inner.update(video)
        }

        fn find_by_id(&self, id: &VideoID) -> AppResult<Option<Video>> {
            if id.to_string() == self.poisoned {
                panic!("corrupt record {}", id);
            }
            self.inner.find_by_id(id)
        }

        fn delete_by_id(&self, id: &VideoID) -> AppResult<()> {
            self.inner.delete_by_id(id)
        }

        fn exists_by_id(&self, id: &VideoID) -> AppResult<bool> {
            self.inner.exists_by_id(id)
        }
    }

    #[tokio::test]
    async fn test_panicking_reconciliation_is_failed_and_consumption_continues() {
        let (store, video) = seeded();
        let listener = listener(Arc::new(PanickingGateway {
            inner: store.clone(),
            poisoned: "poison".to_string(),
        }));
        let (tx, rx) = mpsc::channel(4);

        listener.start(rx);
        tx.send(completed("poison", "R1")).await.unwrap();
        tx.send(completed(&video.id().to_string(), "R1")).await.unwrap();
        drop(tx);

        assert_eq!(listener.join().await, 2);
        let stored = store.find_by_id(video.id()).unwrap().unwrap();
        assert_eq!(stored.video().unwrap().status(), MediaStatus::Completed);
    }
}
