//! Tokenizing of single directive lines.

use crate::constants::{ARMOR_BEGIN, ARMOR_END, COMMENT_CHAR};

const BLANKS: [char; 2] = [' ', '\t'];

/// A directive line split into its name and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Directive<'a> {
    pub variable: &'a str,
    pub value: &'a str,
}

/// What a raw line means to the parser, given whether it sits inside armor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Blank, comment, armor marker or armored content.
    Skip,
    /// Undecoded bytes of a line that must hold a directive.
    Candidate(&'a [u8]),
}

/// Removes the line feed and a carriage return right before it.
pub(crate) fn strip_line_ending(mut line: &[u8]) -> &[u8] {
    if let Some(rest) = line.strip_suffix(b"\n") {
        line = rest.strip_suffix(b"\r").unwrap_or(rest);
    }
    line
}

/// Classifies `line` and updates `armored` when it crosses a marker.
///
/// Works on raw bytes so skipped lines never need to be valid UTF-8.
pub(crate) fn classify<'a>(line: &'a [u8], armored: &mut bool) -> LineKind<'a> {
    if *armored {
        if line.starts_with(ARMOR_END.as_bytes()) {
            *armored = false;
        }
        return LineKind::Skip;
    }

    if line.starts_with(ARMOR_BEGIN.as_bytes()) {
        *armored = true;
        return LineKind::Skip;
    }

    match line.trim_ascii_start().first() {
        None => LineKind::Skip,
        Some(&first) if first == COMMENT_CHAR as u8 => LineKind::Skip,
        Some(_) => LineKind::Candidate(line),
    }
}

/// Splits `line` into the leading name and the value after the separators.
///
/// The name ends at the first tab, space or `=`. The value starts after any
/// tabs/spaces, one optional `=`, and any tabs/spaces after it.
pub(crate) fn tokenize(line: &str) -> Directive<'_> {
    let line = line.trim_start().trim_end_matches(BLANKS);

    let end = line.find([' ', '\t', '=']).unwrap_or(line.len());
    let (variable, rest) = line.split_at(end);

    let rest = rest.trim_start_matches(BLANKS);
    let value = match rest.strip_prefix('=') {
        Some(after) => after.trim_start_matches(BLANKS),
        None => rest,
    };

    Directive { variable, value }
}
