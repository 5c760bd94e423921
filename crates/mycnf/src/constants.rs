//! Centralized constants for the mycnf workspace.
//!
//! Default connection values, well-known option file locations, and the
//! environment variables consulted by the resolver.

// =============================================================================
// Connection Defaults
// =============================================================================

/// Host used when no source provides one.
pub const DEFAULT_HOST: &str = "localhost";

/// Default MySQL TCP port, used when no source provides one.
pub const DEFAULT_PORT: &str = "3306";

// =============================================================================
// Option File Locations
// =============================================================================

/// System-wide option files, read before the caller's file.
pub const SYSTEM_CONFIG_PATHS: &[&str] = &["/etc/mysql/my.cnf", "/etc/my.cnf"];

/// Per-user option file name, looked up in the home directory.
pub const USER_CONFIG_FILE_NAME: &str = ".my.cnf";

/// Maximum nesting of `!include` / `!includedir` directives.
pub const MAX_INCLUDE_DEPTH: usize = 8;

/// File extensions picked up by `!includedir`.
#[cfg(windows)]
pub const INCLUDE_DIR_EXTENSIONS: &[&str] = &["cnf", "ini"];

/// File extensions picked up by `!includedir`.
#[cfg(not(windows))]
pub const INCLUDE_DIR_EXTENSIONS: &[&str] = &["cnf"];

// =============================================================================
// Environment Variables
// =============================================================================

/// Overrides the host from option files.
pub const ENV_HOST: &str = "MYSQL_HOST";

/// Overrides the port from option files.
pub const ENV_PORT: &str = "MYSQL_TCP_PORT";

/// Overrides the user from option files.
pub const ENV_USER: &str = "MYSQL_USER";

/// Overrides the database from option files.
pub const ENV_DATABASE: &str = "MYSQL_DATABASE";

/// Overrides the password from option files.
pub const ENV_PASSWORD: &str = "MYSQL_PWD";

/// Caller option file path, used when none was set on the resolver.
pub const ENV_CONFIG_PATH: &str = "MYCNF_CONFIG_PATH";

/// Profile name, used when none was set on the resolver.
pub const ENV_PROFILE: &str = "MYCNF_PROFILE";
