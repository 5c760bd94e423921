//! Profile resolution from option files, caller values and the environment.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ProfileResolver` applying field precedence.
//! - Apply MySQL client environment variables and optional `.env` loading.
//! - Offer `resolve_profile()` for callers that only need the field mapping.
//!
//! Does NOT handle:
//! - Parsing option file syntax (see `ini.rs`).
//! - Locating files and following includes (see `sources.rs`).
//!
//! Invariants / Assumptions:
//! - Caller values take precedence over option file values, which take
//!   precedence over the built-in host/port defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod mode;
mod profile;

pub use builder::{ProfileResolver, resolve_profile};
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use mode::ResolveMode;

#[cfg(test)]
mod tests;
