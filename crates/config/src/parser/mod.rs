//! Directive file parser.
//!
//! Responsibilities:
//! - Read directive files line by line into `ConfigEntry` values.
//! - Skip blank lines, `#` comments and armored blocks of key material.
//! - Read the server file and per-host files below a configuration base.
//!
//! Does NOT handle:
//! - Interpreting values (see `accessors`).
//! - Choosing where the configuration base is (see `paths`).
//!
//! Invariants:
//! - Line numbers are 1-based and count every physical line, including
//!   skipped ones.
//! - A syntax error stops parsing of that file only; entries inserted before
//!   it stay in the store.
//! - A file ending inside an armored block is not an error.
//! - Only directive lines are decoded; comments and armored content may hold
//!   arbitrary bytes.

mod line;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ConfigError;
use crate::paths::ConfigPaths;
use crate::store::ConfigStore;
use crate::types::ConfigEntry;

use line::{LineKind, classify, strip_line_ending, tokenize};

/// Parses the directive file at `path` into `store`.
///
/// Returns the number of entries inserted.
pub fn read_config_file(
    store: &mut ConfigStore,
    path: impl AsRef<Path>,
) -> Result<usize, ConfigError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| {
        tracing::error!(path = %path.display(), error = %source, "Cannot open config file");
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    read_config(store, BufReader::new(file), path)
}

/// Parses directives from `reader`, tagging entries with `origin`.
///
/// Returns the number of entries inserted.
pub fn read_config<R: BufRead>(
    store: &mut ConfigStore,
    mut reader: R,
    origin: &Path,
) -> Result<usize, ConfigError> {
    let mut armored = false;
    let mut inserted = 0;
    let mut lineno = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|source| {
            tracing::error!(
                path = %origin.display(),
                line = lineno + 1,
                error = %source,
                "Failed to read config file"
            );
            ConfigError::Io {
                path: origin.to_path_buf(),
                source,
            }
        })?;
        if read == 0 {
            break;
        }
        lineno += 1;

        let raw = match classify(strip_line_ending(&buf), &mut armored) {
            LineKind::Skip => continue,
            LineKind::Candidate(raw) => raw,
        };

        let Ok(text) = std::str::from_utf8(raw) else {
            let err = ConfigError::Encoding {
                line: lineno,
                path: origin.to_path_buf(),
            };
            tracing::error!(path = %origin.display(), line = lineno, "{err}");
            return Err(err);
        };
        let directive = tokenize(text);

        if directive.variable.is_empty() {
            let err = ConfigError::MissingVariable {
                line: lineno,
                path: origin.to_path_buf(),
            };
            tracing::error!(path = %origin.display(), line = lineno, "{err}");
            return Err(err);
        }

        if directive.value.is_empty() {
            let err = ConfigError::Syntax {
                variable: directive.variable.to_string(),
                line: lineno,
                path: origin.to_path_buf(),
            };
            tracing::error!(
                variable = directive.variable,
                path = %origin.display(),
                line = lineno,
                "{err}"
            );
            return Err(err);
        }

        store.insert(ConfigEntry::new(
            directive.variable,
            directive.value,
            origin,
            lineno,
        ));
        inserted += 1;
    }

    if armored {
        tracing::debug!(
            path = %origin.display(),
            "Config file ended inside an armored block"
        );
    }

    tracing::debug!(path = %origin.display(), entries = inserted, "Config file parsed");
    Ok(inserted)
}

/// Reads `tinc.conf` from the configuration base.
pub fn read_server_config(
    store: &mut ConfigStore,
    paths: &ConfigPaths,
) -> Result<usize, ConfigError> {
    let path = paths.server_config_path();
    tracing::info!(path = %path.display(), "Reading server configuration");
    read_config_file(store, path)
}

/// Reads the host file for node `name` from the configuration base.
pub fn read_host_config(
    store: &mut ConfigStore,
    paths: &ConfigPaths,
    name: &str,
) -> Result<usize, ConfigError> {
    read_config_file(store, paths.host_config_path(name))
}
