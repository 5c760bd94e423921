//! Profile section matching across loaded option files.
//!
//! Responsibilities:
//! - Collect field values from every section matching the requested profile.
//! - Record which files contributed a matching section.
//!
//! Does NOT handle:
//! - Caller values, built-in defaults or required-field checks (see builder.rs).
//!
//! Invariants:
//! - Sections are visited in effective order; a later matching section
//!   overrides an earlier one key by key.
//! - Empty option values are treated as absent.
//! - Within one section `database` is preferred over `dbname`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::ini::Section;
use crate::sources::LoadedSection;
use crate::types::ProfileField;

/// Field values gathered from the sections matching one profile.
#[derive(Default)]
pub(crate) struct ProfileMatch {
    values: HashMap<ProfileField, String>,
    sources: Vec<PathBuf>,
}

impl ProfileMatch {
    pub(crate) fn value(&self, field: ProfileField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub(crate) fn into_sources(self) -> Vec<PathBuf> {
        self.sources
    }
}

/// Find and merge every section named `profile`.
///
/// Returns `None` when no loaded section matches.
pub(crate) fn find_profile(sections: &[LoadedSection], profile: &str) -> Option<ProfileMatch> {
    let mut found: Option<ProfileMatch> = None;

    for loaded in sections.iter().filter(|l| l.section.matches(profile)) {
        let merged = found.get_or_insert_with(ProfileMatch::default);
        for field in ProfileField::ALL {
            if let Some(value) = section_value(&loaded.section, field) {
                merged.values.insert(field, value.to_string());
            }
        }

        if !merged.sources.contains(&loaded.path) {
            tracing::debug!(
                profile,
                path = %loaded.path.display(),
                "Found matching profile section"
            );
            merged.sources.push(loaded.path.clone());
        }
    }

    found
}

fn section_value(section: &Section, field: ProfileField) -> Option<&str> {
    field
        .option_keys()
        .iter()
        .filter_map(|key| section.get(key))
        .find(|value| !value.is_empty())
}
