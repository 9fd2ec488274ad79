// --- File: crates/coderelay_relay/src/models.rs ---

use serde::{Deserialize, Serialize};
use serde_json::Value;

// Conditionally import ToSchema if openapi feature is enabled
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Body of `POST /ingest`. Unknown fields are rejected.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct VerificationRequest {
    #[cfg_attr(feature = "openapi", schema(example = "+14155552671"))]
    pub phone: String,
    #[serde(rename = "authCode")]
    #[cfg_attr(feature = "openapi", schema(example = "8842", min_length = 4, max_length = 16))]
    pub auth_code: String,
}

// --- Structures for the destination API payload ---

/// A named template parameter. The code always travels as parameter `"1"`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CustomParam {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    #[serde(rename = "whatsappNumber")]
    pub whatsapp_number: String,
    #[serde(rename = "customParams")]
    pub custom_params: Vec<CustomParam>,
}

/// What gets POSTed to the selected destination.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OutboundPayload {
    pub template_name: String,
    pub broadcast_name: String,
    pub receivers: Vec<Receiver>,
    pub channel_number: String,
}

// --- Structures for responses to our callers ---

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ForwardedResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "FORWARDED"))]
    pub status: &'static str,
    /// URL of the destination that handled the request.
    pub dest: String,
    /// Destination response body, `{}` when it was not JSON.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: Value,
}

impl ForwardedResponse {
    pub fn new(dest: String, data: Value) -> Self {
        Self {
            status: "FORWARDED",
            dest,
            data,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
    pub ok: bool,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
}
