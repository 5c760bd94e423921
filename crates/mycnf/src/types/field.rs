//! The five connection fields a profile resolves.

use std::fmt;

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};

/// A field of a resolved connection profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileField {
    Host,
    Port,
    Database,
    User,
    Password,
}

impl ProfileField {
    /// Every field, in output order.
    pub const ALL: [ProfileField; 5] = [
        ProfileField::Host,
        ProfileField::Port,
        ProfileField::Database,
        ProfileField::User,
        ProfileField::Password,
    ];

    /// Fields that must be non-empty when falling back to caller values.
    pub const REQUIRED: [ProfileField; 3] = [
        ProfileField::Database,
        ProfileField::User,
        ProfileField::Password,
    ];

    /// Key used in the resolved field mapping.
    pub fn key(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Port => "port",
            Self::Database => "database",
            Self::User => "user",
            Self::Password => "password",
        }
    }

    /// Option file keys that supply this field, most preferred first.
    pub fn option_keys(self) -> &'static [&'static str] {
        match self {
            Self::Host => &["host"],
            Self::Port => &["port"],
            Self::Database => &["database", "dbname"],
            Self::User => &["user"],
            Self::Password => &["password"],
        }
    }

    /// Built-in value used when no source provides one.
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            Self::Host => Some(DEFAULT_HOST),
            Self::Port => Some(DEFAULT_PORT),
            Self::Database | Self::User | Self::Password => None,
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
