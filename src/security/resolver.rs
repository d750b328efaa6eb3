//! DNS resolver for the validator's HTTP client.
//!
//! Hostnames are classified before each request, but the client resolves
//! them again when it connects. This resolver drops internal addresses at
//! connect time so a host that re-resolves to a private address between the
//! two lookups still cannot be reached.

use std::io;
use std::time::Duration;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};

use super::host_classifier::public_addrs;

#[derive(Debug, Clone)]
pub struct PublicOnlyResolver {
    dns_timeout: Duration,
}

impl PublicOnlyResolver {
    pub fn new(dns_timeout: Duration) -> Self {
        Self { dns_timeout }
    }
}

impl Resolve for PublicOnlyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let dns_timeout = self.dns_timeout;
        Box::pin(async move {
            let host = name.as_str().to_string();
            let resolved =
                tokio::time::timeout(dns_timeout, tokio::net::lookup_host((host.as_str(), 0)))
                    .await
                    .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "dns lookup timed out"))??;
            let addrs = public_addrs(resolved);
            if addrs.is_empty() {
                tracing::warn!(host = %host, "connect-time resolution yielded only internal addresses");
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("{host} resolves only to internal addresses"),
                )
                .into());
            }
            let addrs: Addrs = Box::new(addrs.into_iter());
            Ok(addrs)
        })
    }
}
