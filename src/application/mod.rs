// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Wires gateways, services and the encoder listener together
// - Routes catalog command lines to the services
// - Translates internal errors into caller-facing responses
// - Holds no business rules of its own

pub mod commands;
pub mod error_handling;
pub mod state;

pub use commands::{parse_line, render_reply, CatalogCommand, CommandReply};
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::{AppState, Gateways};
