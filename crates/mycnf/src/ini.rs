//! Best-effort reader for MySQL option files.
//!
//! Responsibilities:
//! - Split an option file into ordered entries: sections and the
//!   `!include` / `!includedir` directives between them.
//! - Hand the key/value lines between directives to `configparser`.
//! - Apply MySQL value rules on top: `-`/`_` key equivalence, quoting,
//!   trailing `#` comments and backslash escapes.
//! - Tolerate malformed input line by line instead of rejecting the whole file.
//!
//! Does NOT handle:
//! - Following include directives (see `sources.rs`).
//! - Deciding which section answers a profile request (see `loader`).
//!
//! Invariants:
//! - Section names and keys are case-insensitive and stored lower-cased.
//! - Keys are stored with `-` normalized to `_`.
//! - An include directive keeps its position among the sections, so options
//!   written after it take precedence over the included file.
//! - Warnings about malformed lines carry the line number only, never the line
//!   content, since option files routinely hold passwords.

use std::fmt;
use std::path::{Path, PathBuf};

use configparser::ini::{Ini, IniDefault};

const COMMENT_SYMBOLS: [char; 2] = ['#', ';'];

/// An include directive found in an option file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Include {
    /// `!include <file>`
    File(PathBuf),
    /// `!includedir <dir>`
    Dir(PathBuf),
}

/// One `[name]` group of an option file.
#[derive(Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    /// `None` marks a boolean-style key written without `=`.
    entries: Vec<(String, Option<String>)>,
}

impl Section {
    /// Section name, lower-cased.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this section answers to `name`, ignoring case and surrounding whitespace.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name.trim().to_lowercase()
    }

    /// Value of `key`, honoring the last assignment in the section.
    ///
    /// Returns `None` when the key is absent or was last written as a bare
    /// flag (`skip-ssl`); a flag never stands in for a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Normalized keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

// Values are left out so a stray `{:?}` cannot print a password.
impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A section or include directive, in the order it appears in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Section(Section),
    Include(Include),
}

/// A parsed option file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionFile {
    entries: Vec<Entry>,
}

impl OptionFile {
    /// Parse option file content. Never fails; malformed lines are skipped.
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut file = OptionFile::default();
        let mut block = Block::default();

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(COMMENT_SYMBOLS) {
                continue;
            }

            if let Some(directive) = line.strip_prefix('!') {
                match parse_directive(directive) {
                    Some(include) => {
                        file.push_block(block.take());
                        file.entries.push(Entry::Include(include));
                    }
                    None => tracing::warn!(line = line_no, "Ignoring unknown option file directive"),
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                match rest.split_once(']') {
                    Some((name, trailing))
                        if !name.trim().is_empty() && is_comment_or_blank(trailing) =>
                    {
                        block.open(name.trim());
                    }
                    _ => {
                        tracing::warn!(line = line_no, "Skipping malformed section header");
                        block.close();
                    }
                }
                continue;
            }

            if !block.in_section() {
                tracing::warn!(line = line_no, "Skipping option outside of any section");
                continue;
            }

            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (strip_inline_comment(line), None),
            };
            let key = normalize_key(key);
            if key.is_empty() {
                tracing::warn!(line = line_no, "Skipping option with empty name");
                continue;
            }
            block.push_option(&key, value);
        }

        file.push_block(block.take());
        file
    }

    /// Read and parse the file at `path`.
    ///
    /// A missing or unreadable file yields `None`; it is never an error.
    pub fn load(path: &Path) -> Option<Self> {
        let _span = tracing::debug_span!("option_file", path = %path.display()).entered();
        match std::fs::read(path) {
            Ok(bytes) => {
                tracing::debug!("Read option file");
                Some(Self::parse(&String::from_utf8_lossy(&bytes)))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Option file unavailable, skipping");
                None
            }
        }
    }

    /// Sections and include directives in file order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// All sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Section(section) => Some(section),
            Entry::Include(_) => None,
        })
    }

    /// Sections answering to `name`, in file order.
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections().filter(move |s| s.matches(name))
    }

    /// Include directives in file order.
    pub fn includes(&self) -> impl Iterator<Item = &Include> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Include(include) => Some(include),
            Entry::Section(_) => None,
        })
    }

    fn push_block(&mut self, text: String) {
        if text.is_empty() {
            return;
        }

        let mut ini = Ini::new_from_defaults(option_file_defaults());
        let map = match ini.read(text) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unparseable option block");
                return;
            }
        };

        for (name, options) in map {
            let entries = options
                .into_iter()
                .map(|(key, value)| (key, value.as_deref().map(parse_value)))
                .collect();
            self.entries.push(Entry::Section(Section { name, entries }));
        }
    }
}

/// Lines between two include directives, rewritten for `configparser`.
#[derive(Default)]
struct Block {
    section: Option<String>,
    text: String,
}

impl Block {
    fn open(&mut self, name: &str) {
        self.section = Some(name.to_string());
        self.push_header(name);
    }

    // An unterminated header closes the current section so later keys are not
    // misattributed.
    fn close(&mut self) {
        self.section = None;
    }

    fn in_section(&self) -> bool {
        self.section.is_some()
    }

    fn push_option(&mut self, key: &str, value: Option<&str>) {
        // After a directive the open section carries on in a fresh block.
        if self.text.is_empty()
            && let Some(name) = self.section.clone()
        {
            self.push_header(&name);
        }
        self.text.push_str(key);
        if let Some(value) = value {
            self.text.push('=');
            self.text.push_str(value);
        }
        self.text.push('\n');
    }

    fn push_header(&mut self, name: &str) {
        self.text.push('[');
        self.text.push_str(name);
        self.text.push_str("]\n");
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

fn option_file_defaults() -> IniDefault {
    let mut defaults = IniDefault::default();
    defaults.comment_symbols = COMMENT_SYMBOLS.to_vec();
    defaults.delimiters = vec!['='];
    // Trailing comments need a preceding space, which `parse_value` checks.
    defaults.enable_inline_comments = false;
    defaults
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('-', "_")
}

fn parse_directive(directive: &str) -> Option<Include> {
    let (name, arg) = directive.split_once(char::is_whitespace)?;
    let arg = arg.trim();
    if arg.is_empty() {
        return None;
    }
    if name.eq_ignore_ascii_case("include") {
        Some(Include::File(PathBuf::from(arg)))
    } else if name.eq_ignore_ascii_case("includedir") {
        Some(Include::Dir(PathBuf::from(arg)))
    } else {
        None
    }
}

fn parse_value(raw: &str) -> String {
    let value = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote)
            && let Some(end) = inner.find(quote)
        {
            return unescape(&inner[..end]);
        }
    }
    unescape(strip_inline_comment(value))
}

/// Cut a trailing `# comment`; the `#` must follow whitespace.
fn strip_inline_comment(value: &str) -> &str {
    let mut prev_whitespace = false;
    for (i, c) in value.char_indices() {
        if c == '#' && prev_whitespace {
            return value[..i].trim_end();
        }
        prev_whitespace = c.is_whitespace();
    }
    value
}

/// Expand `\b`, `\t`, `\n`, `\r`, `\\` and `\s`. Any other backslash is kept.
fn unescape(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('s') => out.push(' '),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn is_comment_or_blank(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text.starts_with(COMMENT_SYMBOLS)
}
