// --- File: crates/coderelay_relay/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use chrono::Utc;
use coderelay_common::{RelayError, ValidationError};
use coderelay_config::{AppConfig, DestinationConfig};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::logic::build_payload;
use crate::models::{ForwardedResponse, HealthResponse, VerificationRequest};
use crate::selector::{EmptyRotation, RoundRobin};
use crate::service::{Forwarder, HttpForwarder};

#[derive(Error, Debug)]
pub enum RelayInitError {
    #[error("no destinations configured")]
    NoDestinations(#[from] EmptyRotation),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Shared state of the relay handlers.
pub struct RelayState {
    pub config: Arc<AppConfig>,
    pub destinations: RoundRobin<DestinationConfig>,
    pub forwarder: Arc<dyn Forwarder>,
}

impl RelayState {
    pub fn new(config: Arc<AppConfig>, forwarder: Arc<dyn Forwarder>) -> Result<Self, RelayInitError> {
        let destinations = RoundRobin::new(config.destinations.clone())?;
        Ok(Self {
            config,
            destinations,
            forwarder,
        })
    }

    /// State with the production HTTP forwarder.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, RelayInitError> {
        let forwarder = HttpForwarder::with_timeout(config.relay.forward_timeout_secs)?;
        Self::new(config, Arc::new(forwarder))
    }
}

/// Liveness message.
pub async fn root_handler() -> &'static str {
    "coderelay is running"
}

#[axum::debug_handler]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: Utc::now().timestamp_millis(),
    })
}

/// Validates a verification request and forwards it to the next destination.
///
/// Every attempt runs inside an `ingest` span carrying a fresh request id, so
/// rejected bodies are correlatable as well. `dest` and `position` are filled
/// in once a destination has been picked.
#[axum::debug_handler]
pub async fn ingest_handler(
    State(state): State<Arc<RelayState>>,
    payload: Result<Json<VerificationRequest>, JsonRejection>,
) -> Result<Json<ForwardedResponse>, RelayError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("ingest", %request_id, dest = field::Empty, position = field::Empty);
    ingest(&state, payload).instrument(span).await
}

async fn ingest(
    state: &RelayState,
    payload: Result<Json<VerificationRequest>, JsonRejection>,
) -> Result<Json<ForwardedResponse>, RelayError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected ingest body: {}", rejection.body_text());
        ValidationError::Body(rejection.body_text())
    })?;

    if let Err(e) = request.validate() {
        warn!(phone = %request.phone, "Rejected ingest request: {}", e);
        return Err(e.into());
    }

    let (position, destination) = state.destinations.next();
    let span = Span::current();
    span.record("dest", destination.url.as_str());
    span.record("position", position);

    info!(phone = %request.phone, "Verification request received");
    let outbound = build_payload(&request, destination, &state.config.relay);

    match state.forwarder.forward(destination, &outbound).await {
        Ok(data) => {
            info!("Verification code forwarded");
            Ok(Json(ForwardedResponse::new(destination.url.clone(), data)))
        }
        Err(e) => {
            error!("Round robin delivery failed: {}", e);
            Err(e)
        }
    }
}
