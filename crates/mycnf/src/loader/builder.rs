//! Profile resolver builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ProfileResolver` collecting the profile name,
//!   option file locations, caller values and the resolution mode.
//! - Resolve the final `ConnectionProfile` from loaded option files.
//!
//! Does NOT handle:
//! - Environment variable parsing (delegated to env.rs).
//! - Section matching across files (delegated to profile.rs).
//! - Reading files and following includes (see `sources.rs`).
//!
//! Invariants / Assumptions:
//! - Per field: caller value > option file value > built-in default.
//! - Empty caller values are treated as unset.
//! - `resolve()` reads the files afresh on every call and never mutates the builder.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};

use super::env::apply_env;
use super::error::ConfigError;
use super::mode::ResolveMode;
use super::profile::{ProfileMatch, find_profile};
use crate::sources::{ConfigSources, system_config_paths};
use crate::types::{ConnectionProfile, ProfileField, ProfileFields};

/// Resolves a named connection profile from MySQL option files.
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    profile_name: Option<String>,
    config_path: Option<PathBuf>,
    system_paths: Vec<PathBuf>,
    mode: ResolveMode,
    host: Option<String>,
    port: Option<String>,
    database: Option<String>,
    user: Option<String>,
    password: Option<SecretString>,
}

impl Default for ProfileResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileResolver {
    /// Create a resolver reading the well-known system files and `~/.my.cnf`.
    pub fn new() -> Self {
        Self {
            profile_name: None,
            config_path: None,
            system_paths: system_config_paths(),
            mode: ResolveMode::default(),
            host: None,
            port: None,
            database: None,
            user: None,
            password: None,
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Set the profile (option group) to resolve.
    pub fn with_profile_name(mut self, name: String) -> Self {
        self.profile_name = Some(name);
        self
    }

    /// Set the caller option file, read after the system files.
    ///
    /// Defaults to `~/.my.cnf`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Replace the system-wide option files.
    pub fn with_system_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.system_paths = paths;
        self
    }

    /// Read only the caller option file.
    pub fn without_system_paths(mut self) -> Self {
        self.system_paths.clear();
        self
    }

    /// Choose how a missing profile section is handled.
    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the host, overriding option files.
    pub fn with_host(mut self, host: String) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the port, overriding option files.
    pub fn with_port(mut self, port: String) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database, overriding option files.
    pub fn with_database(mut self, database: String) -> Self {
        self.database = Some(database);
        self
    }

    /// Set the user, overriding option files.
    pub fn with_user(mut self, user: String) -> Self {
        self.user = Some(user);
        self
    }

    /// Set the password, overriding option files.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Read caller values from the MySQL client environment variables.
    ///
    /// Values set by builder calls made after this one still win.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// The option files this resolver scans, lowest priority first.
    pub fn sources(&self) -> ConfigSources {
        ConfigSources::with_primary(self.system_paths.clone(), self.config_path.clone())
    }

    /// Resolve the connection profile.
    ///
    /// # Errors
    ///
    /// - `ConfigError::EmptyProfileName` if no profile name (or a blank one) was set.
    /// - `ConfigError::ProfileNotFound` if no option file defines the profile and the
    ///   mode is `ResolveMode::ProfileRequired`.
    /// - `ConfigError::MissingRequiredField` if the mode is `ResolveMode::CallerFallback`
    ///   and database, user or password end up empty.
    pub fn resolve(&self) -> Result<ConnectionProfile, ConfigError> {
        let profile = self.profile_name.as_deref().map(str::trim).unwrap_or_default();
        if profile.is_empty() {
            return Err(ConfigError::EmptyProfileName);
        }

        let sections = self.sources().load();
        let found = find_profile(&sections, profile);

        if found.is_none() {
            match self.mode {
                ResolveMode::ProfileRequired => {
                    return Err(ConfigError::ProfileNotFound(profile.to_string()));
                }
                ResolveMode::CallerFallback => {
                    tracing::debug!(profile, "Profile not found in option files, using caller values");
                }
            }
        }

        let matched = found.as_ref();
        let host = pick(ProfileField::Host, self.host.as_deref(), matched);
        let port = pick(ProfileField::Port, self.port.as_deref(), matched);
        let database = pick(ProfileField::Database, self.database.as_deref(), matched);
        let user = pick(ProfileField::User, self.user.as_deref(), matched);
        let password = pick(
            ProfileField::Password,
            self.password.as_ref().map(|p| p.expose_secret()),
            matched,
        );

        if self.mode == ResolveMode::CallerFallback {
            for (field, value) in ProfileField::REQUIRED
                .into_iter()
                .zip([&database, &user, &password])
            {
                if value.is_empty() {
                    return Err(ConfigError::MissingRequiredField {
                        field,
                        profile: profile.to_string(),
                    });
                }
            }
        }

        Ok(ConnectionProfile {
            profile: profile.to_string(),
            host,
            port,
            database,
            user,
            password: SecretString::new(password.into()),
            sources: found.map(ProfileMatch::into_sources).unwrap_or_default(),
        })
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn profile_name(&self) -> Option<&String> {
        self.profile_name.as_ref()
    }

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_profile_name(&mut self, name: Option<String>) {
        self.profile_name = name;
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn set_host(&mut self, host: Option<String>) {
        self.host = host;
    }

    pub(crate) fn set_port(&mut self, port: Option<String>) {
        self.port = port;
    }

    pub(crate) fn set_database(&mut self, database: Option<String>) {
        self.database = database;
    }

    pub(crate) fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }
}

/// Caller value, then option file value, then built-in default.
fn pick(field: ProfileField, caller: Option<&str>, matched: Option<&ProfileMatch>) -> String {
    caller
        .filter(|value| !value.is_empty())
        .or_else(|| matched.and_then(|m| m.value(field)))
        .or(field.default_value())
        .unwrap_or_default()
        .to_string()
}

/// Resolve `profile` from the system option files and the file at `path`.
///
/// Uses `ResolveMode::ProfileRequired`; see [`ProfileResolver`] for control
/// over sources, caller values and the resolution mode.
pub fn resolve_profile(path: &Path, profile: &str) -> Result<ProfileFields, ConfigError> {
    ProfileResolver::new()
        .with_config_path(path.to_path_buf())
        .with_profile_name(profile.to_string())
        .resolve()
        .map(|resolved| resolved.fields())
}
