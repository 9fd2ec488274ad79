// --- File: crates/coderelay_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;   // Error taxonomy
pub mod http;    // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types for easier access
pub use error::{HttpStatusCode, RelayError, ValidationError};

// Re-export HTTP utilities for easier access
pub use http::client::create_client;

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
