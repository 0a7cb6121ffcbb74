//! Centralized constants for the configuration subsystem.
//!
//! This module contains the marker strings, file names and default
//! locations shared by the parser, the path resolver and key-file handling.

// =============================================================================
// Directive File Syntax
// =============================================================================

/// Prefix of a line that opens an armored block (embedded key material).
pub const ARMOR_BEGIN: &str = "-----BEGIN";

/// Prefix of a line that closes an armored block.
pub const ARMOR_END: &str = "-----END";

/// First non-whitespace character of a comment line.
pub const COMMENT_CHAR: char = '#';

// =============================================================================
// Default Locations
// =============================================================================

/// System configuration directory the `tinc/` tree lives under.
pub const CONFDIR: &str = "/etc";

/// System state directory the `log/` tree lives under.
pub const LOCALSTATEDIR: &str = "/var";

/// Base identity name; suffixed with `.<netname>` when a network is named.
pub const IDENT_BASE: &str = "tinc";

/// Server configuration file name inside the configuration base.
pub const SERVER_CONFIG_FILE: &str = "tinc.conf";

/// Directory inside the configuration base holding per-host files.
pub const HOSTS_DIR: &str = "hosts";

// =============================================================================
// Key Files
// =============================================================================

/// Creation mask applied before key files are opened: nothing for group/other.
pub const KEY_FILE_UMASK: u32 = 0o077;

/// Mode requested when a key file is created.
pub const KEY_FILE_MODE: u32 = 0o600;

/// Header of an active private key block.
pub const PRIVATE_KEY_BEGIN: &str = "-----BEGIN RSA";

/// Footer of an active private key block.
pub const PRIVATE_KEY_END: &str = "-----END RSA";

/// Segment of a key marker that identifies the key type.
pub const KEY_TYPE_SEGMENT: &str = "RSA";

/// Replacement for [`KEY_TYPE_SEGMENT`] marking a block as superseded.
///
/// Must be exactly as long as the segment it replaces.
pub const OBSOLETE_KEY_SEGMENT: &str = "OLD";
