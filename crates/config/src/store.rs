//! Ordered multi-valued store of parsed directives.
//!
//! Responsibilities:
//! - Own every `ConfigEntry` produced by the parser.
//! - Answer first-occurrence and next-occurrence lookups by variable name.
//! - Offer typed shortcuts over the first occurrence of a variable.
//!
//! Does NOT handle:
//! - Reading files (see `parser`).
//! - Value conversion rules (see `accessors`).
//!
//! Invariants:
//! - Entries are never rejected, never mutated and never removed one by one.
//! - Occurrences of one variable are enumerated in ascending `(line, file)`
//!   order, independent of insertion order.
//! - The store is written only during the build phase; afterwards `&ConfigStore`
//!   is shared freely without locking.

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::ops::Bound;

use crate::accessors;
use crate::error::ConfigError;
use crate::types::{ConfigEntry, Subnet};

/// The configuration table of a running process.
#[derive(Debug, Default)]
pub struct ConfigStore {
    entries: BTreeSet<ConfigEntry>,
    next_seq: u64,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Duplicate variable names are always accepted.
    pub fn insert(&mut self, entry: ConfigEntry) {
        self.next_seq += 1;
        self.entries.insert(entry.with_seq(self.next_seq));
    }

    /// Returns the occurrence of `variable` with the lowest `(line, file)`.
    pub fn lookup_first(&self, variable: &str) -> Option<&ConfigEntry> {
        let probe = ConfigEntry::probe(variable);
        self.entries
            .range((Bound::Included(&probe), Bound::Unbounded))
            .next()
            .filter(|found| found.is_named(variable))
    }

    /// Returns the occurrence following `entry`, if it names the same variable.
    ///
    /// An entry built outside the store stands for every stored entry with the
    /// same `(variable, line, file)`; the result follows all of them.
    pub fn lookup_next(&self, entry: &ConfigEntry) -> Option<&ConfigEntry> {
        let after_twins;
        let bound = if entry.seq() == 0 {
            after_twins = entry.clone().with_seq(u64::MAX);
            &after_twins
        } else {
            entry
        };
        self.entries
            .range((Bound::Excluded(bound), Bound::Unbounded))
            .next()
            .filter(|found| found.is_named(entry.variable()))
    }

    /// Iterates over every occurrence of `variable` in file-read order.
    pub fn lookup_all<'a>(
        &'a self,
        variable: &str,
    ) -> impl Iterator<Item = &'a ConfigEntry> + use<'a> {
        std::iter::successors(self.lookup_first(variable), move |entry| {
            self.lookup_next(entry)
        })
    }

    /// Iterates over all entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Releases every entry and resets the store to empty.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_seq = 0;
    }

    pub fn get_bool(&self, variable: &str) -> Result<Option<bool>, ConfigError> {
        accessors::get_bool(self.lookup_first(variable))
    }

    pub fn get_int(&self, variable: &str) -> Result<Option<i64>, ConfigError> {
        accessors::get_int(self.lookup_first(variable))
    }

    pub fn get_string(&self, variable: &str) -> Option<String> {
        accessors::get_string(self.lookup_first(variable))
    }

    pub fn get_address(&self, variable: &str) -> Result<Option<Vec<IpAddr>>, ConfigError> {
        accessors::get_address(self.lookup_first(variable))
    }

    pub fn get_subnet(&self, variable: &str) -> Result<Option<Subnet>, ConfigError> {
        accessors::get_subnet(self.lookup_first(variable))
    }
}
