// src/domain/validation/mod.rs
//
// Validation primitives shared by every aggregate.
//
// RULES:
// - Aggregates validate themselves by appending to a handler
// - Appending never fails on a Notification
// - The fail-fast handler aborts on the first appended error

pub mod handler;
pub mod notification;
pub mod throws;

pub use handler::{Error, ValidationHandler};
pub use notification::Notification;
pub use throws::ThrowsValidationHandler;
