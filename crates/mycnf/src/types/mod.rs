//! Connection profile types.
//!
//! Responsibilities:
//! - Define the resolved `ConnectionProfile` and its field mapping.
//! - Name the five profile fields, their option file keys and built-in defaults.
//!
//! Does NOT handle:
//! - Option file loading or precedence (see `loader` module).
//!
//! Invariants:
//! - Passwords are held as `secrecy::SecretString` to prevent accidental logging.

mod field;
mod profile;

pub use field::ProfileField;
pub use profile::{ConnectionProfile, ProfileFields};
