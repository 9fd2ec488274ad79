// --- File: crates/services/coderelay_backend/src/app.rs ---
use axum::Router;
use coderelay_config::{AppConfig, ConfigError, RateLimitConfig};
use coderelay_relay::{routes, RelayInitError, RelayState};
use http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Relay(#[from] RelayInitError),
    #[error("invalid rate limit: {0}")]
    RateLimit(String),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Time after which one request slot is given back to the global bucket.
pub fn replenish_interval(limit: &RateLimitConfig) -> Result<Duration, AppError> {
    if limit.max_requests == 0 {
        return Err(AppError::RateLimit("max_requests must be positive".to_string()));
    }
    let interval = Duration::from_millis(limit.window_ms) / limit.max_requests;
    if interval.is_zero() {
        return Err(AppError::RateLimit(format!(
            "{} requests per {} ms is finer than the limiter can express",
            limit.max_requests, limit.window_ms
        )));
    }
    Ok(interval)
}

/// Composes the full application: relay routes behind the bearer gate,
/// optional CORS, the global rate limiter and request tracing.
///
/// Layers added last run first, so a request meets tracing, then the rate
/// limiter, then CORS, then the bearer gate.
pub fn build_app(config: Arc<AppConfig>) -> Result<Router, AppError> {
    let state = RelayState::from_config(config.clone())?;
    let mut app = routes(Arc::new(state));

    if config.server.cors_enabled {
        info!("CORS enabled for any origin");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE]);
        app = app.layer(cors);
    }

    let limit = &config.relay.rate_limit;
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(GlobalKeyExtractor)
            .period(replenish_interval(limit)?)
            .burst_size(limit.max_requests)
            .finish()
            .ok_or_else(|| AppError::RateLimit("rejected by the rate limiter".to_string()))?,
    );
    info!(
        max_requests = limit.max_requests,
        window_ms = limit.window_ms,
        "Global rate limit configured"
    );

    Ok(app
        .layer(GovernorLayer {
            config: rate_limit_config,
        })
        .layer(TraceLayer::new_for_http()))
}
