//! Flat environment variables understood by the relay.
//!
//! Besides the prefixed `CODERELAY__SECTION__KEY` layer handled by the `config`
//! crate, deployments configure the relay through a handful of flat names:
//!
//! - `ENTRY_TOKEN`, `PORT`
//! - `WATI_URL`, `WATI_TOKEN`, `CHANNEL_NUMBER` for the primary destination
//! - `DEST_2_URL`, `DEST_2_TOKEN`, `DEST_2_CHANNEL`, `DEST_3_...` for the rest
//!
//! Every function here takes a lookup closure instead of reading `std::env`
//! directly so the scan can be exercised against a plain map.

use config::ConfigError;
use tracing::warn;

use crate::models::{AppConfig, DestinationConfig};

pub const ENTRY_TOKEN: &str = "ENTRY_TOKEN";
pub const PORT: &str = "PORT";
pub const PRIMARY_URL: &str = "WATI_URL";
pub const PRIMARY_TOKEN: &str = "WATI_TOKEN";
pub const PRIMARY_CHANNEL: &str = "CHANNEL_NUMBER";

/// Numbered destinations start at 2; the primary one is implicitly number 1.
pub const FIRST_NUMBERED_DESTINATION: usize = 2;

/// Builds the `DEST_{index}_{suffix}` variable name.
pub fn numbered_var(index: usize, suffix: &str) -> String {
    format!("DEST_{}_{}", index, suffix)
}

/// Collects destinations from the flat variables, in rotation order.
///
/// The primary destination is included only when all three of its variables
/// are set. Numbered destinations are scanned from `DEST_2` upwards and the
/// scan stops at the first index without a `_URL`. A numbered destination
/// whose URL is present but whose token or channel is missing is rejected.
pub fn scan_destinations<F>(lookup: F) -> Result<Vec<DestinationConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut destinations = Vec::new();

    match (get(PRIMARY_URL), get(PRIMARY_TOKEN), get(PRIMARY_CHANNEL)) {
        (Some(url), Some(token), Some(channel)) => {
            destinations.push(DestinationConfig::new(url, token, channel));
        }
        (None, None, None) => {}
        _ => warn!(
            "Primary destination skipped: {}, {} and {} must all be set",
            PRIMARY_URL, PRIMARY_TOKEN, PRIMARY_CHANNEL
        ),
    }

    let mut index = FIRST_NUMBERED_DESTINATION;
    while let Some(url) = get(&numbered_var(index, "URL")) {
        let token = get(&numbered_var(index, "TOKEN")).ok_or_else(|| {
            ConfigError::Message(format!(
                "{} is set but {} is missing",
                numbered_var(index, "URL"),
                numbered_var(index, "TOKEN")
            ))
        })?;
        let channel = get(&numbered_var(index, "CHANNEL")).ok_or_else(|| {
            ConfigError::Message(format!(
                "{} is set but {} is missing",
                numbered_var(index, "URL"),
                numbered_var(index, "CHANNEL")
            ))
        })?;
        destinations.push(DestinationConfig::new(url, token, channel));
        index += 1;
    }

    Ok(destinations)
}

/// Applies the flat variables on top of an already layered configuration.
///
/// A non-empty destination scan replaces whatever list the config files held.
pub fn apply_flat_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(ENTRY_TOKEN).filter(|v| !v.is_empty()) {
        config.relay.entry_token = token;
    }

    if let Some(port) = lookup(PORT).filter(|v| !v.is_empty()) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Message(format!("{} must be a port number, got '{}'", PORT, port)))?;
    }

    let scanned = scan_destinations(&lookup)?;
    if !scanned.is_empty() {
        config.destinations = scanned;
    }

    Ok(config)
}
