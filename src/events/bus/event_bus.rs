// src/events/bus/event_bus.rs
//
// Event Bus - In-Process Dispatch
//
// CRITICAL RULES:
// - Delivery is synchronous, in subscription order, on the emitting thread
// - The subscriber list is snapshotted before dispatch; no lock is held
//   while a subscriber runs, so subscribers may emit or subscribe
// - A panicking subscriber is counted and logged, never propagated
// - History is a fixed-size window over the latest emissions

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use log::{debug, error};
use uuid::Uuid;

use crate::events::types::DomainEvent;

/// Emissions kept by `EventBus::new`
pub const DEFAULT_HISTORY: usize = 128;

type Subscriber = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// What happened to one emitted event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub event_type: &'static str,
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub delivered: usize,
    pub failed: usize,
}

/// Typed publish/subscribe between services and whoever reacts to
/// their facts (encoder dispatch, logging).
pub struct EventBus {
    subscribers: RwLock<HashMap<TypeId, Vec<Subscriber>>>,
    history: Mutex<VecDeque<Emission>>,
    history_capacity: usize,
    emitted: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }

    /// A capacity of zero keeps no history; the emission counter still runs.
    pub fn with_history(capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            history: Mutex::new(VecDeque::with_capacity(capacity)),
            history_capacity: capacity,
            emitted: AtomicU64::new(0),
        }
    }

    /// ```ignore
    /// bus.subscribe::<VideoMediaCreated, _>(|event| {
    ///     println!("Media stored at {}", event.file_path);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, subscriber: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let erased: Subscriber = Arc::new(move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                subscriber(event);
            }
        });

        self.subscribers
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    pub fn emit<E>(&self, event: E) -> Emission
    where
        E: DomainEvent + 'static,
    {
        let targets = self.subscribers_of::<E>();

        let mut failed = 0;
        for (idx, subscriber) in targets.iter().enumerate() {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| subscriber(&event as &dyn Any))) {
                failed += 1;
                error!(
                    "[EVENT] Subscriber {} for {} panicked: {:?}",
                    idx,
                    event.event_type(),
                    panic
                );
            }
        }

        let emission = Emission {
            event_type: event.event_type(),
            event_id: event.event_id(),
            occurred_at: event.occurred_at(),
            delivered: targets.len() - failed,
            failed,
        };
        debug!(
            "[EVENT] {} ({}) delivered to {}/{}",
            emission.event_type,
            emission.event_id,
            emission.delivered,
            targets.len()
        );

        self.emitted.fetch_add(1, Ordering::Relaxed);
        self.remember(emission.clone());
        emission
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Latest emissions, oldest first, at most `history_capacity` of them
    pub fn recent(&self) -> Vec<Emission> {
        self.history
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Every emission since construction, including ones aged out of history
    pub fn emitted_total(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    fn subscribers_of<E: 'static>(&self) -> Vec<Subscriber> {
        self.subscribers
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(&TypeId::of::<E>())
            .cloned()
            .unwrap_or_default()
    }

    fn remember(&self, emission: Emission) {
        if self.history_capacity == 0 {
            return;
        }
        let mut history = self.history.lock().unwrap_or_else(|p| p.into_inner());
        if history.len() == self.history_capacity {
            history.pop_front();
        }
        history.push_back(emission);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResourceID, VideoID};
    use crate::events::types::*;
    use std::sync::atomic::AtomicUsize;

    fn media_created() -> VideoMediaCreated {
        VideoMediaCreated::new(
            VideoID::from("v1"),
            ResourceID::from("r1"),
            "videoId-v1/type-VIDEO/r1".to_string(),
        )
    }

    #[test]
    fn test_subscriber_receives_typed_event() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);

        bus.subscribe::<VideoMediaCreated, _>(move |event| {
            assert_eq!(event.file_path, "videoId-v1/type-VIDEO/r1");
            seen.fetch_add(1, Ordering::SeqCst);
        });
        bus.subscribe::<VideoDeleted, _>(|_| panic!("wrong type delivered"));

        let emission = bus.emit(media_created());

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(emission.delivered, 1);
        assert_eq!(emission.failed, 0);
    }

    #[test]
    fn test_subscribers_run_in_subscription_order() {
        let bus = EventBus::new();
        let sequence = Arc::new(Mutex::new(Vec::new()));

        for n in 1..=3 {
            let seq = Arc::clone(&sequence);
            bus.subscribe::<VideoDeleted, _>(move |_| seq.lock().unwrap().push(n));
        }

        bus.emit(VideoDeleted::new(VideoID::from("v1")));

        assert_eq!(*sequence.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_history_keeps_latest_emissions_only() {
        let bus = EventBus::with_history(3);

        for _ in 0..10_000 {
            bus.emit(media_created());
        }
        let last = bus.emit(VideoDeleted::new(VideoID::from("v1")));

        let recent = bus.recent();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[2], last);
        assert_eq!(recent[0].event_type, "VideoMediaCreated");
        assert_eq!(bus.emitted_total(), 10_001);
    }

    #[test]
    fn test_zero_history_still_counts() {
        let bus = EventBus::with_history(0);
        bus.emit(media_created());

        assert!(bus.recent().is_empty());
        assert_eq!(bus.emitted_total(), 1);
    }

    #[test]
    fn test_subscriber_count() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count::<VideoDeleted>(), 0);

        bus.subscribe::<VideoDeleted, _>(|_| {});
        bus.subscribe::<VideoDeleted, _>(|_| {});
        assert_eq!(bus.subscriber_count::<VideoDeleted>(), 2);
        assert_eq!(bus.subscriber_count::<VideoMediaCreated>(), 0);
    }

    #[test]
    fn test_panicking_subscriber_is_counted_and_isolated() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe::<VideoDeleted, _>(|_| panic!("Intentional panic"));
        let seen = Arc::clone(&counter);
        bus.subscribe::<VideoDeleted, _>(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let emission = bus.emit(VideoDeleted::new(VideoID::from("v1")));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(emission.delivered, 1);
        assert_eq!(emission.failed, 1);
    }

    #[test]
    fn test_subscriber_may_emit_follow_up_events() {
        let bus = Arc::new(EventBus::new());
        let deleted = Arc::new(AtomicUsize::new(0));

        let inner = Arc::clone(&bus);
        bus.subscribe::<VideoMediaCreated, _>(move |event| {
            inner.emit(VideoDeleted::new(event.video_id.clone()));
        });
        let seen = Arc::clone(&deleted);
        bus.subscribe::<VideoDeleted, _>(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(media_created());

        assert_eq!(deleted.load(Ordering::SeqCst), 1);
        assert_eq!(bus.emitted_total(), 2);
    }
}
