//! A single parsed directive occurrence.
//!
//! Responsibilities:
//! - Hold the variable name, raw value and origin (file, line) of a directive.
//! - Define the total order used by `ConfigStore`.
//!
//! Does NOT handle:
//! - Converting the value to typed views (see `accessors`).
//! - Storage and lookup (see `store`).
//!
//! Invariants:
//! - Entries are immutable; no setter exists for any field.
//! - Order is `(variable, line, file, seq)` with the variable compared
//!   ASCII-case-insensitively. `seq` is assigned by the store on insert and
//!   only separates entries that would otherwise compare equal.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// One `variable = value` directive, tagged with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    variable: String,
    value: String,
    file: PathBuf,
    line: usize,
    seq: u64,
}

impl ConfigEntry {
    /// Creates an entry for `variable` read from `file` at 1-based `line`.
    pub fn new(
        variable: impl Into<String>,
        value: impl Into<String>,
        file: impl Into<PathBuf>,
        line: usize,
    ) -> Self {
        Self {
            variable: variable.into(),
            value: value.into(),
            file: file.into(),
            line,
            seq: 0,
        }
    }

    /// Synthetic key that sorts before every stored entry named `variable`.
    pub(crate) fn probe(variable: &str) -> Self {
        Self::new(variable, String::new(), PathBuf::new(), 0)
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn with_seq(mut self, seq: u64) -> Self {
        self.seq = seq;
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The trimmed raw text of the directive.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Whether this entry is an occurrence of `variable` (case-insensitive).
    pub fn is_named(&self, variable: &str) -> bool {
        self.variable.eq_ignore_ascii_case(variable)
    }
}

fn cmp_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

impl Ord for ConfigEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_ignore_ascii_case(&self.variable, &other.variable)
            .then_with(|| self.line.cmp(&other.line))
            .then_with(|| self.file.cmp(&other.file))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ConfigEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ConfigEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ConfigEntry {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_dominates_line() {
        let a = ConfigEntry::new("Address", "x", "b.conf", 9);
        let b = ConfigEntry::new("name", "y", "a.conf", 1);
        assert!(a < b);
    }

    #[test]
    fn test_case_insensitive_grouping() {
        let a = ConfigEntry::new("PORT", "655", "f", 2);
        let b = ConfigEntry::new("port", "656", "f", 3);
        assert!(a < b);
        assert!(a.is_named("Port"));
        assert!(b.is_named("PORT"));
    }

    #[test]
    fn test_line_before_file() {
        let a = ConfigEntry::new("Name", "x", "z.conf", 1);
        let b = ConfigEntry::new("Name", "y", "a.conf", 2);
        assert!(a < b);
    }

    #[test]
    fn test_file_breaks_line_ties() {
        let a = ConfigEntry::new("Name", "x", "a.conf", 4);
        let b = ConfigEntry::new("Name", "y", "b.conf", 4);
        assert!(a < b);
    }

    #[test]
    fn test_seq_breaks_full_ties() {
        let a = ConfigEntry::new("Name", "x", "a.conf", 4).with_seq(1);
        let b = ConfigEntry::new("name", "x", "a.conf", 4).with_seq(2);
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_probe_sorts_first() {
        let probe = ConfigEntry::probe("name");
        let entry = ConfigEntry::new("Name", "alice", "a.conf", 1).with_seq(1);
        assert!(probe < entry);
        assert!(probe > ConfigEntry::new("Mode", "router", "a.conf", 1));
    }
}
