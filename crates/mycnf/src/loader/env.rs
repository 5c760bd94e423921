//! Environment variable parsing for profile resolution.
//!
//! Responsibilities:
//! - Read the MySQL client environment variables and apply them as caller values.
//! - Fill the option file path and profile name from `MYCNF_*` variables.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Reading option files (see `sources.rs`).
//! - Applying precedence (see builder.rs).
//! - .env file loading (handled by ProfileResolver::load_dotenv).
//!
//! Invariants:
//! - Connection variables overwrite caller values set before `from_env()`.
//! - `MYCNF_CONFIG_PATH` and `MYCNF_PROFILE` never replace values already set.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use secrecy::SecretString;

use super::builder::ProfileResolver;
use super::error::ConfigError;
use crate::constants::{
    ENV_CONFIG_PATH, ENV_DATABASE, ENV_HOST, ENV_PASSWORD, ENV_PORT, ENV_PROFILE, ENV_USER,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the resolver.
pub fn apply_env(resolver: &mut ProfileResolver) -> Result<(), ConfigError> {
    if let Some(host) = env_var_or_none(ENV_HOST) {
        resolver.set_host(Some(host));
    }
    if let Some(port) = env_var_or_none(ENV_PORT) {
        port.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            var: ENV_PORT.to_string(),
            message: "must be a TCP port number".to_string(),
        })?;
        resolver.set_port(Some(port));
    }
    if let Some(user) = env_var_or_none(ENV_USER) {
        resolver.set_user(Some(user));
    }
    if let Some(database) = env_var_or_none(ENV_DATABASE) {
        resolver.set_database(Some(database));
    }
    if let Some(password) = env_var_or_none(ENV_PASSWORD) {
        resolver.set_password(Some(SecretString::new(password.into())));
    }

    if resolver.config_path().is_none()
        && let Some(config_path) = env_var_or_none(ENV_CONFIG_PATH)
    {
        resolver.set_config_path(Some(std::path::PathBuf::from(config_path)));
    }
    if resolver.profile_name().is_none()
        && let Some(profile) = env_var_or_none(ENV_PROFILE)
    {
        resolver.set_profile_name(Some(profile));
    }

    Ok(())
}
