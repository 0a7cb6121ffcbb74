//! Secure acquisition and rotation of private key files.
//!
//! Responsibilities:
//! - Choose a key file path through an injected `PathPrompt` strategy.
//! - Resolve relative paths against the current directory.
//! - Open or create the file with no group/other access.
//! - Retire superseded key blocks in place and append new key material.
//!
//! Does NOT handle:
//! - Generating or parsing key material (the crypto engine's job).
//! - Guarding against concurrent use of the same path; callers serialize.
//!
//! Invariants:
//! - The process file-creation mask is restricted to `0o077` before any
//!   key file is opened, and stays restricted afterwards.
//! - Opening is a single create-if-absent call, so an existing file is never
//!   truncated and there is no window between the existence check and the open.

mod prompt;
mod rotate;

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[cfg(unix)]
use crate::constants::{KEY_FILE_MODE, KEY_FILE_UMASK};

pub use prompt::{DefaultPath, PathPrompt, TerminalPrompt, prompt_for_stdio};
pub use rotate::{disable_old_keys, patch_in_place};

/// Errors that can occur while acquiring or updating a key file.
#[derive(Error, Debug)]
pub enum KeyFileError {
    #[error("Error while reading stdin: {0}")]
    ReadInput(#[source] io::Error),

    #[error("Error while writing prompt: {0}")]
    Prompt(#[source] io::Error),

    #[error("Cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("Error opening file `{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error updating key file `{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An open key file, readable and writable, owned exclusively by the caller.
#[derive(Debug)]
pub struct KeyFile {
    path: PathBuf,
    file: File,
}

impl KeyFile {
    /// Absolute path the file was opened at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    pub fn into_file(self) -> File {
        self.file
    }

    /// Marks every private key block already in the file as obsolete.
    ///
    /// Returns whether any block was marked.
    pub fn disable_old_keys(&mut self) -> Result<bool, KeyFileError> {
        let disabled = disable_old_keys(&mut self.file).map_err(|source| self.io_error(source))?;
        if disabled {
            tracing::warn!(path = %self.path.display(), "Old key(s) found and disabled");
        }
        Ok(disabled)
    }

    /// Appends armored key material at the end of the file.
    pub fn append_armored(&mut self, armored: &str) -> Result<(), KeyFileError> {
        let result = (|| -> io::Result<()> {
            self.file.seek(SeekFrom::End(0))?;
            self.file.write_all(armored.as_bytes())?;
            if !armored.ends_with('\n') {
                self.file.write_all(b"\n")?;
            }
            self.file.flush()
        })();
        result.map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> KeyFileError {
        tracing::error!(path = %self.path.display(), error = %source, "Key file update failed");
        KeyFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Chooses, resolves and opens the key file for `purpose`.
///
/// `default` is offered to the prompt and used when no other path is given.
pub fn acquire_file(
    prompt: &mut dyn PathPrompt,
    default: &Path,
    purpose: &str,
) -> Result<KeyFile, KeyFileError> {
    let chosen = prompt.choose_path(default, purpose)?;
    let path = absolutize(chosen)?;

    restrict_umask();

    let file = open_read_write(&path).map_err(|source| {
        tracing::error!(path = %path.display(), error = %source, "Error opening key file");
        KeyFileError::Open {
            path: path.clone(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), purpose, "Key file opened");
    Ok(KeyFile { path, file })
}

fn absolutize(path: PathBuf) -> Result<PathBuf, KeyFileError> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(KeyFileError::CurrentDir)?;
    Ok(cwd.join(path))
}

#[cfg(unix)]
fn restrict_umask() {
    // SAFETY: umask has no memory effects; it only swaps the creation mask.
    unsafe {
        libc::umask(KEY_FILE_UMASK as libc::mode_t);
    }
}

#[cfg(not(unix))]
fn restrict_umask() {}

fn open_read_write(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(KEY_FILE_MODE);
    }

    options.open(path)
}
