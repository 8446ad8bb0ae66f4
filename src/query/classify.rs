//! Query classification.
//!
//! Decides whether a query is an IPv4 literal or a domain/host name, which in
//! turn selects the query parameter sent to the geolocation service.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Four dot-separated groups of 1-3 digits. Octet ranges are not checked.
const IPV4_LITERAL_PATTERN: &str = r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$";

static IPV4_LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(IPV4_LITERAL_PATTERN).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in IPV4_LITERAL_RE: {}. This is a programming error.",
            IPV4_LITERAL_PATTERN, e
        )
    })
});

/// How a query is sent to the geolocation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Dotted-quad IPv4 literal, sent as `ipAddress`
    IpAddress,
    /// Anything else, sent as `domain`
    Domain,
}

impl QueryKind {
    /// Name of the query parameter carrying the input.
    pub fn param_name(&self) -> &'static str {
        match self {
            QueryKind::IpAddress => "ipAddress",
            QueryKind::Domain => "domain",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::IpAddress => f.write_str("IP address"),
            QueryKind::Domain => f.write_str("domain"),
        }
    }
}

/// Classifies a query string.
///
/// Matches the whole string, so surrounding whitespace makes an IP literal
/// classify as a domain. Callers reject blank input before getting here.
pub fn classify(input: &str) -> QueryKind {
    if IPV4_LITERAL_RE.is_match(input) {
        QueryKind::IpAddress
    } else {
        QueryKind::Domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_literals() {
        for input in ["8.8.8.8", "1.1.1.1", "192.168.0.1", "0.0.0.0", "255.255.255.255"] {
            assert_eq!(classify(input), QueryKind::IpAddress, "{input}");
        }
    }

    #[test]
    fn test_digit_count_only_no_range_check() {
        assert_eq!(classify("999.999.999.999"), QueryKind::IpAddress);
        assert_eq!(classify("256.1.1.1"), QueryKind::IpAddress);
        assert_eq!(classify("007.08.9.10"), QueryKind::IpAddress);
    }

    #[test]
    fn test_domains() {
        for input in [
            "example.com",
            "www.rust-lang.org",
            "localhost",
            "1.2.3",
            "1.2.3.4.5",
            "1234.1.1.1",
            "a.b.c.d",
            "1.2.3.4/24",
            "::1",
            "2001:4860:4860::8888",
        ] {
            assert_eq!(classify(input), QueryKind::Domain, "{input}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_not_stripped() {
        assert_eq!(classify(" 8.8.8.8"), QueryKind::Domain);
        assert_eq!(classify("8.8.8.8\n"), QueryKind::Domain);
    }

    #[test]
    fn test_param_names() {
        assert_eq!(QueryKind::IpAddress.param_name(), "ipAddress");
        assert_eq!(QueryKind::Domain.param_name(), "domain");
    }
}
