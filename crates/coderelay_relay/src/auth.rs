// --- File: crates/coderelay_relay/src/auth.rs ---

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use coderelay_common::RelayError;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use tracing::warn;

/// Path that is always reachable without a credential.
pub const HEALTH_PATH: &str = "/health";

/// The state the bearer gate needs: the shared secret callers must present.
#[derive(Clone)]
pub struct AuthState {
    pub entry_token: String,
}

/// Extracts the credential from an `Authorization: Bearer <token>` value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

/// Axum middleware rejecting every request without the configured bearer token.
///
/// Runs before routing to the handler, so an unauthenticated request is
/// answered with 401 before its body is read, whatever the path, except for
/// [`HEALTH_PATH`].
pub async fn bearer_auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    req: Request,
    next: Next,
) -> Response {
    if req.uri().path() == HEALTH_PATH {
        return next.run(req).await;
    }

    let matches = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .map(|token| constant_time_eq(token.as_bytes(), auth_state.entry_token.as_bytes()));

    match matches {
        Some(true) => next.run(req).await,
        Some(false) => {
            warn!(path = %req.uri().path(), "Rejected request: invalid bearer token");
            RelayError::Unauthorized.into_response()
        }
        None => {
            warn!(path = %req.uri().path(), "Rejected request: missing bearer token");
            RelayError::Unauthorized.into_response()
        }
    }
}
