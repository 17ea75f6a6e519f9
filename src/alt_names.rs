//! Subject alternative names handed to the certificate tool.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use crate::error::ProvisioningError;

/// A single subjectAltName entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AltName {
    Dns(String),
    Ip(IpAddr),
    /// Another OpenSSL SAN type (`URI`, `email`, `RID`, `dirName`,
    /// `otherName`), kept verbatim as `<type>:<value>`.
    Other(String),
}

/// SAN types besides DNS and IP that OpenSSL accepts in `subjectAltName`.
const PASSTHROUGH_TYPES: &[&str] = &["URI", "email", "RID", "dirName", "otherName"];

impl AltName {
    /// Parse a user-supplied entry.
    ///
    /// A bare IP address is an `IP` entry. `DNS:` and `IP:` prefixes are
    /// honored case-insensitively and the other OpenSSL types pass through
    /// unchanged. An unknown prefix is rejected. Anything without a colon is
    /// a `DNS` entry.
    pub fn parse(raw: &str) -> Result<Self, ProvisioningError> {
        let invalid = || ProvisioningError::InvalidAltName(raw.to_string());
        let entry = raw.trim();
        if entry.is_empty() || entry.contains(',') {
            return Err(invalid());
        }

        // Before splitting on ':', so unprefixed IPv6 is not read as a type.
        if let Ok(addr) = entry.parse() {
            return Ok(Self::Ip(addr));
        }

        let Some((kind, value)) = entry.split_once(':') else {
            return Ok(Self::Dns(entry.to_string()));
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(invalid());
        }

        if kind.eq_ignore_ascii_case("dns") {
            Ok(Self::Dns(value.to_string()))
        } else if kind.eq_ignore_ascii_case("ip") {
            value.parse().map(Self::Ip).map_err(|_| invalid())
        } else if let Some(kind) = PASSTHROUGH_TYPES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(kind))
        {
            Ok(Self::Other(format!("{kind}:{value}")))
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for AltName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dns(name) => write!(f, "DNS:{name}"),
            Self::Ip(addr) => write!(f, "IP:{addr}"),
            Self::Other(entry) => f.write_str(entry),
        }
    }
}

/// Entries present on every generated certificate, in this order.
pub fn default_alt_names() -> Vec<AltName> {
    vec![
        AltName::Dns("localhost".to_string()),
        AltName::Ip(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        AltName::Ip(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
    ]
}

/// Defaults followed by `extra` in input order. No deduplication.
pub fn build_alt_names<S: AsRef<str>>(extra: &[S]) -> Result<Vec<AltName>, ProvisioningError> {
    let mut names = default_alt_names();
    for raw in extra {
        names.push(AltName::parse(raw.as_ref())?);
    }
    Ok(names)
}

/// Render the list as an OpenSSL `subjectAltName` value.
pub fn join_alt_names(names: &[AltName]) -> String {
    names
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
