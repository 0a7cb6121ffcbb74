//! Typed views over directive values.
//!
//! Responsibilities:
//! - Convert the raw value of a `ConfigEntry` into a bool, integer, string,
//!   resolved address list or validated subnet.
//! - Log every conversion failure with the variable name, file and line.
//!
//! Does NOT handle:
//! - Deciding how severe a failure is; callers choose whether to abort.
//! - The meaning of any particular variable.
//!
//! Invariants:
//! - `None` in means "variable not set" and yields `Ok(None)`, never an error.
//! - Accessors never mutate the entry or the store.
//! - Malformed subnet literals and subnets with host bits set are distinct
//!   errors (`TypeMismatch` vs `SubnetMismatch`).

use std::net::{IpAddr, Ipv6Addr, ToSocketAddrs};

use crate::error::{ConfigError, ExpectedValue};
use crate::types::{ConfigEntry, Subnet};

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

fn report(err: ConfigError, entry: &ConfigEntry) -> ConfigError {
    tracing::error!(
        variable = %entry.variable(),
        file = %entry.file().display(),
        line = entry.line(),
        "{err}"
    );
    err
}

fn type_mismatch(entry: &ConfigEntry, expected: ExpectedValue) -> ConfigError {
    report(
        ConfigError::TypeMismatch {
            variable: entry.variable().to_string(),
            expected,
            path: entry.file().to_path_buf(),
            line: entry.line(),
        },
        entry,
    )
}

/// `yes` or `no`, compared case-insensitively.
pub fn get_bool(entry: Option<&ConfigEntry>) -> Result<Option<bool>, ConfigError> {
    let Some(entry) = entry else {
        return Ok(None);
    };

    let value = entry.value();
    if value.eq_ignore_ascii_case("yes") {
        Ok(Some(true))
    } else if value.eq_ignore_ascii_case("no") {
        Ok(Some(false))
    } else {
        Err(type_mismatch(entry, ExpectedValue::Bool))
    }
}

/// A base-10 signed integer spanning the whole value.
pub fn get_int(entry: Option<&ConfigEntry>) -> Result<Option<i64>, ConfigError> {
    let Some(entry) = entry else {
        return Ok(None);
    };

    entry
        .value()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| type_mismatch(entry, ExpectedValue::Integer))
}

/// The raw value, copied.
pub fn get_string(entry: Option<&ConfigEntry>) -> Option<String> {
    entry.map(|entry| entry.value().to_string())
}

/// Resolves the value as a literal IP address or a hostname.
///
/// Hostname resolution goes through the system resolver and may block.
pub fn get_address(entry: Option<&ConfigEntry>) -> Result<Option<Vec<IpAddr>>, ConfigError> {
    let Some(entry) = entry else {
        return Ok(None);
    };

    resolve_address(entry.value())
        .map(Some)
        .ok_or_else(|| type_mismatch(entry, ExpectedValue::Address))
}

/// An IPv4, IPv6 or MAC subnet whose host bits are all zero.
pub fn get_subnet(entry: Option<&ConfigEntry>) -> Result<Option<Subnet>, ConfigError> {
    let Some(entry) = entry else {
        return Ok(None);
    };

    let subnet: Subnet = entry
        .value()
        .parse()
        .map_err(|_| type_mismatch(entry, ExpectedValue::Subnet))?;

    if !subnet.is_canonical() {
        return Err(report(
            ConfigError::SubnetMismatch {
                variable: entry.variable().to_string(),
                path: entry.file().to_path_buf(),
                line: entry.line(),
            },
            entry,
        ));
    }

    Ok(Some(subnet))
}

/// Returns the addresses `host` stands for, in resolver order without duplicates.
pub fn resolve_address(host: &str) -> Option<Vec<IpAddr>> {
    if let Ok(addr) = host.parse::<IpAddr>() {
        return Some(vec![addr]);
    }

    if !is_scoped_ipv6(host) && !is_valid_hostname(host) {
        return None;
    }

    let resolved = match (host, 0).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            tracing::debug!(host, error = %e, "Hostname resolution failed");
            return None;
        }
    };

    let mut addrs: Vec<IpAddr> = Vec::new();
    for addr in resolved.map(|sa| sa.ip()) {
        if !addrs.contains(&addr) {
            addrs.push(addr);
        }
    }

    (!addrs.is_empty()).then_some(addrs)
}

/// Whether `host` is an IPv6 literal with a zone suffix, like `fe80::1%eth0`.
fn is_scoped_ipv6(host: &str) -> bool {
    matches!(
        host.split_once('%'),
        Some((addr, zone)) if !zone.is_empty() && addr.parse::<Ipv6Addr>().is_ok()
    )
}

/// Whether `host` could name a DNS host at all.
fn is_valid_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    })
}
