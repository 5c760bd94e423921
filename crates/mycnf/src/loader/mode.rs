//! Behavior when the requested profile section is absent.

/// How resolution treats a profile that no option file defines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
    /// A matching section must exist, else `ConfigError::ProfileNotFound`.
    ///
    /// Database, user and password are returned as found, possibly empty.
    #[default]
    ProfileRequired,
    /// Fall back to caller values when no section matches.
    ///
    /// Database, user and password must end up non-empty, else
    /// `ConfigError::MissingRequiredField`.
    CallerFallback,
}
