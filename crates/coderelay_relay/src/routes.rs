// --- File: crates/coderelay_relay/src/routes.rs ---
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::auth::{bearer_auth_middleware, AuthState, HEALTH_PATH};
use crate::handlers::{health_handler, ingest_handler, root_handler, RelayState};

/// Creates the relay router.
///
/// The bearer gate is applied as a router-wide layer so it also covers
/// unmatched paths; only [`HEALTH_PATH`] bypasses it.
pub fn routes(state: Arc<RelayState>) -> Router {
    let auth_state = Arc::new(AuthState {
        entry_token: state.config.relay.entry_token.clone(),
    });

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut router = Router::new()
        .route("/", get(root_handler))
        .route(HEALTH_PATH, get(health_handler))
        .route("/ingest", post(ingest_handler));

    #[cfg(feature = "openapi")]
    {
        use crate::doc::RelayApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        tracing::info!("Adding Swagger UI at /docs");
        router = router.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", RelayApiDoc::openapi()));
    }

    router
        .layer(middleware::from_fn_with_state(auth_state, bearer_auth_middleware))
        .with_state(state)
}
