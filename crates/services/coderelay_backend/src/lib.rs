// --- File: crates/services/coderelay_backend/src/lib.rs ---
pub mod app;

pub use app::{build_app, AppError};
