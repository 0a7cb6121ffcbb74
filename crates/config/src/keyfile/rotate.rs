//! In-place retirement of superseded private key blocks.
//!
//! Responsibilities:
//! - Find private key begin/end markers in an open key file.
//! - Rewrite their key-type segment to the obsolete sentinel in place.
//!
//! Invariants:
//! - Patches never change the file length or shift any other byte.
//! - After a scan the cursor sits at end of file, ready for appending.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::constants::{
    KEY_TYPE_SEGMENT, OBSOLETE_KEY_SEGMENT, PRIVATE_KEY_BEGIN, PRIVATE_KEY_END,
};

/// Overwrites `original` at `offset` with `replacement`.
///
/// Both slices must have the same length, and the bytes at `offset` must be
/// `original`; anything else is rejected before a byte is written.
pub fn patch_in_place<F: Read + Write + Seek>(
    file: &mut F,
    offset: u64,
    original: &[u8],
    replacement: &[u8],
) -> io::Result<()> {
    if original.len() != replacement.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "replacement must be exactly as long as the text it replaces",
        ));
    }

    let mut current = vec![0u8; original.len()];
    file.seek(SeekFrom::Start(offset))?;
    file.read_exact(&mut current)?;
    if current != original {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "file content at patch offset does not match",
        ));
    }

    file.seek(SeekFrom::Start(offset))?;
    file.write_all(replacement)
}

/// Byte offset of the key-type segment inside a marker line, if it is one.
fn segment_offset(line: &[u8]) -> Option<usize> {
    [PRIVATE_KEY_BEGIN, PRIVATE_KEY_END]
        .into_iter()
        .find(|marker| line.starts_with(marker.as_bytes()))
        .map(|marker| marker.len() - KEY_TYPE_SEGMENT.len())
}

/// Marks every private key block in `file` as obsolete.
///
/// Returns whether any marker was rewritten.
pub fn disable_old_keys<F: Read + Write + Seek>(file: &mut F) -> io::Result<bool> {
    file.seek(SeekFrom::Start(0))?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;

    let mut disabled = false;
    let mut line_start = 0u64;

    for line in contents.split_inclusive(|&b| b == b'\n') {
        if let Some(at) = segment_offset(line) {
            patch_in_place(
                file,
                line_start + at as u64,
                KEY_TYPE_SEGMENT.as_bytes(),
                OBSOLETE_KEY_SEGMENT.as_bytes(),
            )?;
            disabled = true;
        }
        line_start += line.len() as u64;
    }

    file.flush()?;
    file.seek(SeekFrom::End(0))?;
    Ok(disabled)
}
