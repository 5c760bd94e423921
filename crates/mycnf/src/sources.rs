//! Option file discovery and loading.
//!
//! Responsibilities:
//! - Build the ordered list of candidate option files (system files, then the caller file).
//! - Resolve the per-user `~/.my.cnf` through the `directories` crate.
//! - Load every candidate best-effort and expand `!include` / `!includedir` directives.
//!
//! Does NOT handle:
//! - Parsing file content (see `ini.rs`).
//! - Profile matching or precedence (see `loader`).
//!
//! Invariants:
//! - Load order is priority order: later sections override earlier ones.
//! - An included file takes effect at its directive, so options written after
//!   `!include` in the including file override the included file.
//! - Each canonical path is read at most once, which also breaks include cycles.
//! - Missing or unreadable files contribute nothing and never raise an error.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::constants::{
    INCLUDE_DIR_EXTENSIONS, MAX_INCLUDE_DEPTH, SYSTEM_CONFIG_PATHS, USER_CONFIG_FILE_NAME,
};
use crate::ini::{Entry, Include, OptionFile, Section};

/// Returns the per-user option file path (`~/.my.cnf`).
pub(crate) fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    let base_dirs =
        directories::BaseDirs::new().context("Failed to determine the home directory")?;

    Ok(base_dirs.home_dir().join(USER_CONFIG_FILE_NAME))
}

/// Returns the well-known system-wide option file paths.
pub fn system_config_paths() -> Vec<PathBuf> {
    SYSTEM_CONFIG_PATHS.iter().map(PathBuf::from).collect()
}

/// A section read from an option file, in effective order.
#[derive(Debug, Clone)]
pub struct LoadedSection {
    /// File the section was read from, as given or as derived from an include.
    pub path: PathBuf,
    pub section: Section,
}

/// Ordered set of option files to scan, lowest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    paths: Vec<PathBuf>,
}

impl ConfigSources {
    /// Sources scanned in exactly the given order.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// System paths followed by the caller file.
    ///
    /// When `primary` is `None` the per-user `~/.my.cnf` is used; if the home
    /// directory cannot be determined the primary source is skipped.
    pub fn with_primary(system_paths: Vec<PathBuf>, primary: Option<PathBuf>) -> Self {
        let mut paths = system_paths;
        match primary {
            Some(path) => paths.push(path),
            None => match default_config_path() {
                Ok(path) => paths.push(path),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping per-user option file");
                }
            },
        }
        Self { paths }
    }

    /// Candidate paths in scan order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Read every candidate and the files they include.
    ///
    /// Sections come back lowest priority first, with each included file's
    /// sections spliced in where its directive appears.
    pub fn load(&self) -> Vec<LoadedSection> {
        let mut walk = IncludeWalk::default();
        for path in &self.paths {
            walk.visit(path, 0);
        }
        tracing::debug!(
            candidates = self.paths.len(),
            read = walk.files_read,
            sections = walk.sections.len(),
            "Loaded option files"
        );
        walk.sections
    }
}

#[derive(Default)]
struct IncludeWalk {
    seen: HashSet<PathBuf>,
    sections: Vec<LoadedSection>,
    files_read: usize,
}

impl IncludeWalk {
    fn visit(&mut self, path: &Path, depth: usize) {
        let identity = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if !self.seen.insert(identity) {
            tracing::debug!(path = %path.display(), "Option file already read, skipping");
            return;
        }

        let Some(file) = OptionFile::load(path) else {
            return;
        };
        self.files_read += 1;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for entry in file.into_entries() {
            let include = match entry {
                Entry::Section(section) => {
                    self.sections.push(LoadedSection {
                        path: path.to_path_buf(),
                        section,
                    });
                    continue;
                }
                Entry::Include(include) => include,
            };

            if depth >= MAX_INCLUDE_DEPTH {
                tracing::warn!(
                    path = %path.display(),
                    max_depth = MAX_INCLUDE_DEPTH,
                    "Include nesting too deep, ignoring directive"
                );
                continue;
            }

            match include {
                Include::File(target) => self.visit(&base.join(target), depth + 1),
                Include::Dir(dir) => {
                    for entry in include_dir_entries(&base.join(dir)) {
                        self.visit(&entry, depth + 1);
                    }
                }
            }
        }
    }
}

/// Option files of an `!includedir` directory, sorted by name.
fn include_dir_entries(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Include directory unavailable");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    INCLUDE_DIR_EXTENSIONS
                        .iter()
                        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
                })
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn section_files(loaded: &[LoadedSection]) -> Vec<String> {
        loaded
            .iter()
            .map(|l| l.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    fn hosts(loaded: &[LoadedSection]) -> Vec<&str> {
        loaded
            .iter()
            .filter_map(|l| l.section.get("host"))
            .collect()
    }

    #[test]
    fn test_system_config_paths_order() {
        assert_eq!(
            system_config_paths(),
            vec![
                PathBuf::from("/etc/mysql/my.cnf"),
                PathBuf::from("/etc/my.cnf")
            ]
        );
    }

    #[test]
    fn test_default_config_path_is_in_home_dir() {
        let expected = directories::BaseDirs::new()
            .unwrap()
            .home_dir()
            .join(".my.cnf");
        assert_eq!(default_config_path().unwrap(), expected);
    }

    #[test]
    fn test_with_primary_appends_caller_path_last() {
        let sources = ConfigSources::with_primary(
            vec![PathBuf::from("a.cnf"), PathBuf::from("b.cnf")],
            Some(PathBuf::from("mine.cnf")),
        );
        assert_eq!(
            sources.paths(),
            &[
                PathBuf::from("a.cnf"),
                PathBuf::from("b.cnf"),
                PathBuf::from("mine.cnf")
            ]
        );
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("present.cnf");
        fs::write(&present, "[client]\nhost = a\n").unwrap();

        let sources = ConfigSources::new(vec![temp_dir.path().join("absent.cnf"), present]);
        let loaded = sources.load();
        assert_eq!(section_files(&loaded), vec!["present.cnf"]);
    }

    #[test]
    fn test_include_takes_effect_at_directive() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("main.cnf"),
            "[client]\nhost = before\n!include extra.cnf\nhost = after\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("extra.cnf"), "[client]\nhost = extra\n").unwrap();

        let loaded = ConfigSources::new(vec![temp_dir.path().join("main.cnf")]).load();
        assert_eq!(
            section_files(&loaded),
            vec!["main.cnf", "extra.cnf", "main.cnf"]
        );
        assert_eq!(hosts(&loaded), vec!["before", "extra", "after"]);
    }

    #[test]
    fn test_includedir_reads_cnf_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let conf_d = temp_dir.path().join("conf.d");
        fs::create_dir(&conf_d).unwrap();
        fs::write(conf_d.join("20-b.cnf"), "[client]\nhost = b\n").unwrap();
        fs::write(conf_d.join("10-a.cnf"), "[client]\nhost = a\n").unwrap();
        fs::write(conf_d.join("README"), "[client]\nhost = readme\n").unwrap();
        fs::write(
            temp_dir.path().join("my.cnf"),
            format!("[client]\nhost = main\n!includedir {}\n", conf_d.display()),
        )
        .unwrap();

        let loaded = ConfigSources::new(vec![temp_dir.path().join("my.cnf")]).load();
        assert_eq!(
            section_files(&loaded),
            vec!["my.cnf", "10-a.cnf", "20-b.cnf"]
        );
        assert_eq!(hosts(&loaded), vec!["main", "a", "b"]);
    }

    #[test]
    fn test_include_cycle_terminates() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.cnf"), "[client]\n!include b.cnf\n").unwrap();
        fs::write(temp_dir.path().join("b.cnf"), "[client]\n!include a.cnf\n").unwrap();

        let loaded = ConfigSources::new(vec![temp_dir.path().join("a.cnf")]).load();
        assert_eq!(section_files(&loaded), vec!["a.cnf", "b.cnf"]);
    }

    #[test]
    fn test_same_file_listed_twice_is_read_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("my.cnf");
        fs::write(&path, "[client]\n").unwrap();

        let sources = ConfigSources::new(vec![path.clone(), path]);
        assert_eq!(sources.load().len(), 1);
    }

    #[test]
    fn test_include_depth_is_bounded() {
        let temp_dir = TempDir::new().unwrap();
        let chain = MAX_INCLUDE_DEPTH + 3;
        for i in 0..chain {
            fs::write(
                temp_dir.path().join(format!("f{i}.cnf")),
                format!("[client]\nhost = f{i}\n!include f{}.cnf\n", i + 1),
            )
            .unwrap();
        }

        let loaded = ConfigSources::new(vec![temp_dir.path().join("f0.cnf")]).load();
        assert_eq!(loaded.len(), MAX_INCLUDE_DEPTH + 1);
        let deepest = format!("f{MAX_INCLUDE_DEPTH}");
        assert_eq!(hosts(&loaded).last().copied(), Some(deepest.as_str()));
    }
}
