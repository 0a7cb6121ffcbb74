//! Core value types for the configuration subsystem.
//!
//! This module re-exports the directive entry and the subnet value that
//! typed accessors produce.

pub mod entry;
pub mod subnet;

pub use entry::ConfigEntry;
pub use subnet::{MacAddress, Subnet, SubnetParseError};
