use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod env_vars;
pub mod models;
pub use config::ConfigError;
pub use models::*;

/// Loads the layered relay configuration and validates it.
///
/// Sources, lowest precedence first:
/// 1. serde defaults on [`AppConfig`]
/// 2. `$CONFIG_DIR/default` and `$CONFIG_DIR/$RUN_ENV` (both optional)
/// 3. `$PREFIX__SECTION__KEY` environment variables (prefix defaults to `CODERELAY`)
/// 4. the flat variables described in [`env_vars`]
///
/// Fails when the result would leave the relay without a destination, so the
/// caller never starts serving with an unusable configuration.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "CODERELAY".to_string());
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let builder = Config::builder()
        .add_source(File::from(config_dir.join("default")).required(false))
        .add_source(File::from(config_dir.join(&run_env)).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let layered: AppConfig = builder.build()?.try_deserialize()?;
    let config = env_vars::apply_flat_overrides(layered, |key| env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    /// Checks the invariants the relay relies on at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.destinations.is_empty() {
            return Err(ConfigError::Message(
                "no destinations configured: set WATI_URL/WATI_TOKEN/CHANNEL_NUMBER or DEST_n_* or a [[destinations]] table".to_string(),
            ));
        }
        for (i, dest) in self.destinations.iter().enumerate() {
            if dest.url.trim().is_empty() {
                return Err(ConfigError::Message(format!("destination #{} has an empty url", i + 1)));
            }
        }
        if self.relay.entry_token.is_empty() {
            return Err(ConfigError::Message("relay.entry_token must not be empty".to_string()));
        }
        if self.relay.rate_limit.max_requests == 0 || self.relay.rate_limit.window_ms == 0 {
            return Err(ConfigError::Message(
                "relay.rate_limit.max_requests and relay.rate_limit.window_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Logs what was loaded, with secrets reduced to presence markers.
    pub fn log_summary(&self) {
        info!(
            host = %self.server.host,
            port = self.server.port,
            cors_enabled = self.server.cors_enabled,
            entry_token = mask(&self.relay.entry_token),
            destinations = self.destinations.len(),
            "Configuration loaded"
        );
        for (i, dest) in self.destinations.iter().enumerate() {
            info!(
                position = i,
                url = %dest.url,
                token = mask(&dest.token),
                channel = %dest.channel,
                "Destination registered"
            );
        }
        if self.relay.uses_default_entry_token() {
            warn!("ENTRY_TOKEN is not set; the built-in default token is in use and must be overridden in production");
        }
    }
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// `DOTENV_OVERRIDE` wins, then a first command line argument starting with
/// `.env`, then `.env` in the working directory. A missing file is not an error.
/// Returns the path that was tried.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
