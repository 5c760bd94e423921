//! MySQL option file profile resolution.
//!
//! This crate reads MySQL-style `.cnf`/`.ini` option files and resolves a
//! named connection profile (host, port, database, user, password) from them,
//! merged with caller-supplied values and environment variables.

pub mod constants;
pub mod ini;
mod loader;
pub mod sources;
pub mod types;

pub use loader::{ConfigError, ProfileResolver, ResolveMode, env_var_or_none, resolve_profile};
pub use sources::{ConfigSources, LoadedSection};
pub use types::{ConnectionProfile, ProfileField, ProfileFields};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
