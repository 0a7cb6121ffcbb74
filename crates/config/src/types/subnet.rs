//! Subnet values produced by the subnet accessor.
//!
//! Responsibilities:
//! - Parse `a.b.c.d[/len]`, IPv6 `addr[/len]` and `xx:xx:xx:xx:xx:xx` literals.
//! - Report whether an IP subnet has host bits set beyond its prefix length.
//!
//! Does NOT handle:
//! - Logging or directive context (see `accessors`).
//! - Routing decisions based on subnets.
//!
//! Invariants:
//! - A missing prefix length means the full address length (/32 or /128).
//! - MAC subnets have no prefix and are always canonical.
//! - Parsing never rejects host bits; that check is `is_canonical`.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnetwork::IpNetwork;
use thiserror::Error;

/// Reasons a subnet literal could not be parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetParseError {
    #[error("not an IPv4, IPv6 or MAC address")]
    Address,

    #[error("invalid prefix length")]
    Prefix,
}

/// A 48-bit Ethernet address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl FromStr for MacAddress {
    type Err = SubnetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split(':');

        for octet in octets.iter_mut() {
            let part = parts.next().ok_or(SubnetParseError::Address)?;
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(SubnetParseError::Address);
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| SubnetParseError::Address)?;
        }

        if parts.next().is_some() {
            return Err(SubnetParseError::Address);
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// A network a node claims to own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subnet {
    Mac(MacAddress),
    Ip(IpNetwork),
}

impl Subnet {
    /// Prefix length for IP subnets, `None` for MAC subnets.
    pub fn prefix_len(&self) -> Option<u8> {
        match self {
            Subnet::Mac(_) => None,
            Subnet::Ip(net) => Some(net.prefix()),
        }
    }

    /// The address as written, including any host bits.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Subnet::Mac(_) => None,
            Subnet::Ip(net) => Some(net.ip()),
        }
    }

    /// Whether every bit beyond the prefix length is zero.
    pub fn is_canonical(&self) -> bool {
        match self {
            Subnet::Mac(_) => true,
            Subnet::Ip(net) => net.network() == net.ip(),
        }
    }
}

fn max_prefix(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

impl FromStr for Subnet {
    type Err = SubnetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((addr, prefix)) = s.split_once('/') {
            let addr: IpAddr = addr.parse().map_err(|_| SubnetParseError::Address)?;
            if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SubnetParseError::Prefix);
            }
            let prefix: u8 = prefix.parse().map_err(|_| SubnetParseError::Prefix)?;
            let net = IpNetwork::new(addr, prefix).map_err(|_| SubnetParseError::Prefix)?;
            return Ok(Subnet::Ip(net));
        }

        if let Ok(mac) = s.parse::<MacAddress>() {
            return Ok(Subnet::Mac(mac));
        }

        let addr: IpAddr = s.parse().map_err(|_| SubnetParseError::Address)?;
        let net = IpNetwork::new(addr, max_prefix(&addr)).map_err(|_| SubnetParseError::Prefix)?;
        Ok(Subnet::Ip(net))
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subnet::Mac(mac) => fmt::Display::fmt(mac, f),
            Subnet::Ip(net) => write!(f, "{}/{}", net.ip(), net.prefix()),
        }
    }
}
