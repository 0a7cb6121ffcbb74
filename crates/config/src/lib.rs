//! Directive-file configuration for a mesh VPN daemon.
//!
//! This crate provides the ordered, multi-valued configuration store, the
//! parser that fills it from directive files, typed accessors over directive
//! values, and secure handling of private key files.
//!
//! Configuration is built once at startup through a `&mut ConfigStore` and
//! then only read through `&ConfigStore`.

pub mod accessors;
pub mod constants;
mod error;
pub mod keyfile;
mod parser;
mod paths;
mod store;
pub mod types;

pub use error::{ConfigError, ErrorCategory, ExpectedValue};
pub use keyfile::{KeyFile, KeyFileError, PathPrompt, acquire_file};
pub use parser::{read_config, read_config_file, read_host_config, read_server_config};
pub use paths::ConfigPaths;
pub use store::ConfigStore;
pub use types::{ConfigEntry, MacAddress, Subnet, SubnetParseError};
