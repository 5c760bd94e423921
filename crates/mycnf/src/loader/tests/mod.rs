//! Tests for the profile resolver.
//!
//! Responsibilities:
//! - Test builder methods and field precedence.
//! - Test profile resolution from option files in both resolution modes.
//! - Test environment variable and dotenv handling.
//!
//! Invariants:
//! - Tests never read the real system option files: every resolver is built
//!   with `without_system_paths()` or explicit `with_system_paths(...)`.
//! - Tests use `serial_test` and `env_lock()` to prevent environment pollution.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::loader::builder::ProfileResolver;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Writes an option file into `dir` and returns its path.
pub fn write_option_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A resolver reading only `path`.
pub fn resolver_for(path: PathBuf, profile: &str) -> ProfileResolver {
    ProfileResolver::new()
        .without_system_paths()
        .with_config_path(path)
        .with_profile_name(profile.to_string())
}
