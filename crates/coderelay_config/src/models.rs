// --- File: crates/coderelay_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry token used when nothing else is configured. Startup warns while it is in use.
pub const DEFAULT_ENTRY_TOKEN: &str = "CHANGE_ME";
/// Message template the destinations expect for verification codes.
pub const DEFAULT_TEMPLATE_NAME: &str = "codigo_de_verificacion";

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

// --- Rate Limit Config ---
// A single global bucket: `max_requests` per `window_ms`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
        }
    }
}

fn default_max_requests() -> u32 {
    500
}

fn default_window_ms() -> u64 {
    1000
}

// --- Relay Config ---
#[derive(Deserialize, Serialize, Clone)]
pub struct RelayConfig {
    /// Shared secret callers present as `Authorization: Bearer <entry_token>`.
    #[serde(default = "default_entry_token")]
    pub entry_token: String,
    #[serde(default = "default_template_name")]
    pub template_name: String,
    #[serde(default = "default_template_name")]
    pub broadcast_name: String,
    /// Upper bound for one outbound call; a timeout counts as a transport failure.
    #[serde(default = "default_forward_timeout_secs")]
    pub forward_timeout_secs: u64,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            entry_token: default_entry_token(),
            template_name: default_template_name(),
            broadcast_name: default_template_name(),
            forward_timeout_secs: default_forward_timeout_secs(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("entry_token", &mask(&self.entry_token))
            .field("template_name", &self.template_name)
            .field("broadcast_name", &self.broadcast_name)
            .field("forward_timeout_secs", &self.forward_timeout_secs)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl RelayConfig {
    pub fn uses_default_entry_token(&self) -> bool {
        self.entry_token == DEFAULT_ENTRY_TOKEN
    }
}

fn default_entry_token() -> String {
    DEFAULT_ENTRY_TOKEN.to_string()
}

fn default_template_name() -> String {
    DEFAULT_TEMPLATE_NAME.to_string()
}

fn default_forward_timeout_secs() -> u64 {
    30
}

// --- Destination Config ---
/// One downstream messaging-provider channel. Order in `AppConfig::destinations`
/// is the rotation order.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DestinationConfig {
    pub url: String,
    pub token: String,
    pub channel: String,
}

impl DestinationConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            channel: channel.into(),
        }
    }
}

impl fmt::Debug for DestinationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationConfig")
            .field("url", &self.url)
            .field("token", &mask(&self.token))
            .field("channel", &self.channel)
            .finish()
    }
}

/// Presence marker for secrets in logs and `Debug` output.
pub fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "[MISSING]"
    } else {
        "[OK]"
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub destinations: Vec<DestinationConfig>,
}
