// --- File: crates/coderelay_relay/src/service.rs ---
//! Outbound delivery to a destination.
//!
//! Handlers only see the [`Forwarder`] trait so they can run against an
//! in-process double; [`HttpForwarder`] is the reqwest-backed implementation
//! used in production.

use coderelay_common::{create_client, RelayError};
use coderelay_config::DestinationConfig;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, error};

use crate::models::OutboundPayload;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Delivers one payload to one destination.
///
/// On success resolves to the destination's response body. Implementations
/// never retry and never fall back to another destination.
pub trait Forwarder: Send + Sync {
    fn forward<'a>(
        &'a self,
        destination: &'a DestinationConfig,
        payload: &'a OutboundPayload,
    ) -> BoxFuture<'a, Value, RelayError>;
}

/// Forwards over HTTP with the destination's bearer token.
#[derive(Clone, Debug)]
pub struct HttpForwarder {
    client: Client,
}

impl HttpForwarder {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the forwarder with its own client bounded by `timeout_secs`.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        Ok(Self::new(create_client(timeout_secs, true)?))
    }
}

/// Destination bodies that are not JSON are treated as an empty object.
pub fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Default::default()))
}

impl Forwarder for HttpForwarder {
    fn forward<'a>(
        &'a self,
        destination: &'a DestinationConfig,
        payload: &'a OutboundPayload,
    ) -> BoxFuture<'a, Value, RelayError> {
        Box::pin(async move {
            let resp = self
                .client
                .post(&destination.url)
                .bearer_auth(&destination.token)
                .json(payload)
                .send()
                .await
                .map_err(|e| {
                    error!(dest = %destination.url, "HTTP error forwarding verification code: {}", e);
                    RelayError::from(e)
                })?;

            let status = resp.status();
            // A body that cannot be read is handled like one that cannot be parsed.
            let bytes = resp.bytes().await.unwrap_or_default();
            let data = parse_body(&bytes);

            if !status.is_success() {
                error!(dest = %destination.url, status = status.as_u16(), body = %data, "Destination returned an error");
                return Err(RelayError::Downstream {
                    dest: destination.url.clone(),
                    status: status.as_u16(),
                    detail: data,
                });
            }

            debug!(dest = %destination.url, status = status.as_u16(), "Destination accepted payload");
            Ok(data)
        })
    }
}
