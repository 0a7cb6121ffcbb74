//! Error types for configuration parsing and typed access.
//!
//! Responsibilities:
//! - Define error variants for directive file reading and typed conversions.
//! - Classify every variant into the four-way taxonomy (`ErrorCategory`).
//!
//! Does NOT handle:
//! - Key-file acquisition errors (see `keyfile`).
//! - Logging; callers emit the diagnostic before returning the error.
//!
//! Invariants:
//! - Every variant that stems from a directive carries its variable name,
//!   origin file and line so it is actionable on its own.
//! - Errors never carry the raw value of a directive.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What a typed accessor expected to find in a directive value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedValue {
    Bool,
    Integer,
    Address,
    Subnet,
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExpectedValue::Bool => "\"yes\" or \"no\"",
            ExpectedValue::Integer => "Integer",
            ExpectedValue::Address => "Hostname or IP address",
            ExpectedValue::Subnet => "Subnet",
        };
        f.write_str(text)
    }
}

/// Broad classes of configuration failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A file could not be opened, read or written.
    Io,
    /// A directive line could not be tokenized into a name and a value.
    Syntax,
    /// A value could not be converted to the requested type.
    TypeMismatch,
    /// A well-formed value violates a domain invariant.
    Validation,
}

/// Errors that can occur while reading directive files or converting values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No value for variable `{variable}' on line {line} while reading config file {path}")]
    Syntax {
        variable: String,
        line: usize,
        path: PathBuf,
    },

    #[error("No variable name on line {line} while reading config file {path}")]
    MissingVariable { line: usize, path: PathBuf },

    #[error("Line {line} of config file {path} is not valid UTF-8")]
    Encoding { line: usize, path: PathBuf },

    #[error("{expected} expected for configuration variable {variable} in {path} line {line}")]
    TypeMismatch {
        variable: String,
        expected: ExpectedValue,
        path: PathBuf,
        line: usize,
    },

    #[error(
        "Network address and prefix length do not match for configuration variable {variable} in {path} line {line}"
    )]
    SubnetMismatch {
        variable: String,
        path: PathBuf,
        line: usize,
    },
}

impl ConfigError {
    /// Returns the taxonomy class of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConfigError::Io { .. } => ErrorCategory::Io,
            ConfigError::Syntax { .. }
            | ConfigError::MissingVariable { .. }
            | ConfigError::Encoding { .. } => ErrorCategory::Syntax,
            ConfigError::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            ConfigError::SubnetMismatch { .. } => ErrorCategory::Validation,
        }
    }
}
