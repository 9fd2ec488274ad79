// --- File: crates/coderelay_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, RelayError, ValidationError};

// Include the client module
pub mod client;

/// Renders the caller-facing JSON body for an error.
///
/// Validation failures other than the phone check carry a `detail` string;
/// downstream failures carry the destination URL and its body verbatim.
pub fn error_body(err: &RelayError) -> serde_json::Value {
    match err {
        RelayError::Downstream { dest, detail, .. } => json!({
            "error": err.code(),
            "dest": dest,
            "detail": detail,
        }),
        RelayError::Validation(ValidationError::PhoneInvalid) => json!({ "error": err.code() }),
        RelayError::Validation(inner) => json!({
            "error": err.code(),
            "detail": inner.to_string(),
        }),
        RelayError::Unauthorized | RelayError::Transport(_) => json!({ "error": err.code() }),
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status_code, Json(error_body(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: RelayError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unauthorized_body() {
        let (status, body) = render(RelayError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "UNAUTHORIZED" }));
    }

    #[tokio::test]
    async fn test_phone_invalid_body_has_no_detail() {
        let (status, body) = render(ValidationError::PhoneInvalid.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "PHONE_INVALID" }));
    }

    #[tokio::test]
    async fn test_downstream_body_passes_detail_verbatim() {
        let (status, body) = render(RelayError::Downstream {
            dest: "https://a.example/send".into(),
            status: 500,
            detail: json!({ "msg": "bad" }),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({ "error": "WATI_ERROR", "dest": "https://a.example/send", "detail": { "msg": "bad" } })
        );
    }

    #[tokio::test]
    async fn test_transport_body() {
        let (status, body) = render(RelayError::Transport("connection refused".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "FETCH_FAILED" }));
    }
}
