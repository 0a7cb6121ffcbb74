//! Strategies for choosing where a key file goes.
//!
//! Responsibilities:
//! - Ask the operator for a path on a terminal, falling back to a default.
//! - Pick the strategy once, from whether stdin and stdout are terminals.
//!
//! Does NOT handle:
//! - Opening the chosen path or fixing permissions (see `keyfile`).
//!
//! Invariants:
//! - The non-interactive strategy never reads or writes any stream.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use super::KeyFileError;

/// Chooses the path a key file is written to.
pub trait PathPrompt {
    /// Returns the path to use for `purpose`, given the suggested `default`.
    fn choose_path(&mut self, default: &Path, purpose: &str) -> Result<PathBuf, KeyFileError>;
}

/// Uses the default path silently; for scripts and services.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPath;

impl PathPrompt for DefaultPath {
    fn choose_path(&mut self, default: &Path, _purpose: &str) -> Result<PathBuf, KeyFileError> {
        Ok(default.to_path_buf())
    }
}

/// Asks on `output` and reads one line of answer from `input`.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> PathPrompt for TerminalPrompt<R, W> {
    fn choose_path(&mut self, default: &Path, purpose: &str) -> Result<PathBuf, KeyFileError> {
        write!(
            self.output,
            "Please enter a file to save {purpose} to [{}]: ",
            default.display()
        )
        .and_then(|()| self.output.flush())
        .map_err(KeyFileError::Prompt)?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .map_err(KeyFileError::ReadInput)?;

        let answer = answer
            .strip_suffix('\n')
            .map(|a| a.strip_suffix('\r').unwrap_or(a))
            .unwrap_or(&answer);

        if answer.is_empty() {
            Ok(default.to_path_buf())
        } else {
            Ok(PathBuf::from(answer))
        }
    }
}

/// Selects the prompt strategy for the process's standard streams.
pub fn prompt_for_stdio() -> Box<dyn PathPrompt> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    if stdin.is_terminal() && stdout.is_terminal() {
        Box::new(TerminalPrompt::new(stdin.lock(), stdout))
    } else {
        tracing::debug!("Standard streams are not terminals, using default key file paths");
        Box::new(DefaultPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stdin closed"))
        }
    }

    impl BufRead for FailingReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::other("stdin closed"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn test_default_path_is_silent_and_exact() {
        let mut prompt = DefaultPath;
        let path = prompt
            .choose_path(Path::new("rsa_key.priv"), "private RSA key")
            .unwrap();
        assert_eq!(path, PathBuf::from("rsa_key.priv"));
    }

    #[test]
    fn test_terminal_prompt_text_and_answer() {
        let mut prompt = TerminalPrompt::new(Cursor::new("/tmp/mine.priv\n"), Vec::new());
        let path = prompt
            .choose_path(Path::new("/etc/tinc/rsa_key.priv"), "private RSA key")
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/mine.priv"));

        let (_, output) = prompt.into_inner();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Please enter a file to save private RSA key to [/etc/tinc/rsa_key.priv]: "
        );
    }

    #[test]
    fn test_terminal_prompt_empty_answer_uses_default() {
        let mut prompt = TerminalPrompt::new(Cursor::new("\r\n"), Vec::new());
        let path = prompt.choose_path(Path::new("key.priv"), "key").unwrap();
        assert_eq!(path, PathBuf::from("key.priv"));
    }

    #[test]
    fn test_terminal_prompt_eof_uses_default() {
        let mut prompt = TerminalPrompt::new(Cursor::new(""), Vec::new());
        let path = prompt.choose_path(Path::new("key.priv"), "key").unwrap();
        assert_eq!(path, PathBuf::from("key.priv"));
    }

    #[test]
    fn test_terminal_prompt_read_failure_is_error() {
        let mut prompt = TerminalPrompt::new(FailingReader, Vec::new());
        let err = prompt.choose_path(Path::new("key.priv"), "key").unwrap_err();
        assert!(matches!(err, KeyFileError::ReadInput(_)));
    }
}
