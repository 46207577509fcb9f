pub mod event_bus;

pub use event_bus::{Emission, EventBus, DEFAULT_HISTORY};
