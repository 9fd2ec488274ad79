// --- File: crates/coderelay_relay/src/lib.rs ---
pub mod auth;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;
/// Round-robin destination selection.
pub mod selector;
/// Outbound forwarding to destinations.
pub mod service;

pub use handlers::{RelayInitError, RelayState};
pub use models::{ForwardedResponse, OutboundPayload, VerificationRequest};
pub use routes::routes;
