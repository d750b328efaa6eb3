//! SSRF protection: decides whether a hostname points at an internal target.

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::pin::Pin;
use std::time::Duration;

/// Hostnames blocked without touching DNS.
const LITERAL_DENYLIST: &[&str] = &["localhost", "127.0.0.1", "::1"];

/// Decides whether outbound requests to a host must be refused.
///
/// The validator consults this before every request it issues, including
/// each redirect hop.
pub trait HostClassifier: Send + Sync {
    fn is_internal<'a>(&'a self, host: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;
}

/// Production classifier: literal checks first, then forward DNS.
#[derive(Debug, Clone)]
pub struct DnsHostClassifier {
    dns_timeout: Duration,
}

impl DnsHostClassifier {
    pub fn new(dns_timeout: Duration) -> Self {
        Self { dns_timeout }
    }

    pub fn dns_timeout(&self) -> Duration {
        self.dns_timeout
    }
}

impl HostClassifier for DnsHostClassifier {
    fn is_internal<'a>(&'a self, host: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(is_internal_host(host, self.dns_timeout))
    }
}

/// Check whether an IP address is private, loopback, link-local, or unroutable.
pub fn is_internal_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_internal_v4(*v4),
        IpAddr::V6(v6) => is_internal_v6(*v6),
    }
}

fn is_internal_v4(v4: Ipv4Addr) -> bool {
    v4.is_loopback()
        || v4.is_private()
        || v4.is_link_local()
        || v4.is_unspecified()
        || v4.is_broadcast()
}

fn is_internal_v6(v6: Ipv6Addr) -> bool {
    let segs = v6.segments();
    v6.is_loopback()
        || v6.is_unspecified()
        || (segs[0] & 0xfe00) == 0xfc00 // unique-local fc00::/7
        || (segs[0] & 0xffc0) == 0xfe80 // link-local fe80::/10
        || v6.to_ipv4_mapped().is_some_and(is_internal_v4)
        || embedded_v4(v6).is_some_and(is_internal_v4)
}

/// IPv4 carried in the low 32 bits of `::/96` (IPv4-compatible) or
/// `64:ff9b::/96` (NAT64 well-known prefix).
fn embedded_v4(v6: Ipv6Addr) -> Option<Ipv4Addr> {
    let segs = v6.segments();
    let compatible = segs[..6] == [0; 6];
    let nat64 = segs[..6] == [0x64, 0xff9b, 0, 0, 0, 0];
    if !compatible && !nat64 {
        return None;
    }
    let [.., a, b, c, d] = v6.octets();
    Some(Ipv4Addr::new(a, b, c, d))
}

/// True when any address in a resolution set is internal.
pub fn any_internal<I>(addrs: I) -> bool
where
    I: IntoIterator<Item = SocketAddr>,
{
    addrs.into_iter().any(|addr| is_internal_ip(&addr.ip()))
}

/// Addresses from a resolution set that are safe to connect to.
pub fn public_addrs<I>(addrs: I) -> Vec<SocketAddr>
where
    I: IntoIterator<Item = SocketAddr>,
{
    addrs
        .into_iter()
        .filter(|addr| !is_internal_ip(&addr.ip()))
        .collect()
}

/// Strip IPv6 brackets and a trailing root dot, lowercase the rest.
fn normalize_host(host: &str) -> String {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    bare.strip_suffix('.').unwrap_or(bare).to_ascii_lowercase()
}

/// Classify a host without any network access.
///
/// Returns `Some(verdict)` when the answer is known from the literal
/// denylist or an IP literal, `None` when DNS is required.
pub fn classify_literal(host: &str) -> Option<bool> {
    let bare = normalize_host(host);
    if LITERAL_DENYLIST.contains(&bare.as_str()) || bare.ends_with(".localhost") {
        return Some(true);
    }
    bare.parse::<IpAddr>().ok().map(|ip| is_internal_ip(&ip))
}

/// Check whether `host` is, or resolves to, an internal address.
///
/// Any internal address in the resolution set blocks the host. A lookup
/// that fails or exceeds `dns_timeout` yields `false`: the connection
/// attempt that follows fails on its own and is reported as a
/// connectivity error.
pub async fn is_internal_host(host: &str, dns_timeout: Duration) -> bool {
    if let Some(verdict) = classify_literal(host) {
        return verdict;
    }

    let bare = normalize_host(host);
    match tokio::time::timeout(dns_timeout, tokio::net::lookup_host((bare.as_str(), 0))).await {
        Ok(Ok(addrs)) => {
            let internal = any_internal(addrs);
            if internal {
                tracing::warn!(host = %bare, "host resolves to internal address");
            }
            internal
        }
        Ok(Err(e)) => {
            tracing::debug!(host = %bare, error = %e, "dns lookup failed; not classified internal");
            false
        }
        Err(_) => {
            tracing::debug!(host = %bare, timeout_ms = dns_timeout.as_millis(), "dns lookup timed out");
            false
        }
    }
}
