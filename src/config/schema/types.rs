use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path the config was loaded from (computed, not serialized).
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub validator: ValidatorConfig,

    #[serde(default)]
    pub site: SiteConfig,
}

/// Outbound link validation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub max_redirects: u8,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub dns_timeout_ms: u64,
    /// Product token at the start of the `User-Agent`.
    pub product: String,
    pub contact_url: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_redirects: 3,
            connect_timeout_ms: 10_000,
            read_timeout_ms: 15_000,
            dns_timeout_ms: 3_000,
            product: "EmbedGate".into(),
            contact_url: "https://example.org/embedgate".into(),
        }
    }
}

impl ValidatorConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }
}

/// Identity of the deployment this process serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Primary host, optionally with a port (`localhost:3000`).
    pub canonical_domain: String,
    /// Hosts of additional sub-sites served by the same deployment.
    pub subsite_domains: Vec<String>,
    pub community_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            canonical_domain: "localhost:3000".into(),
            subsite_domains: Vec::new(),
            community_name: "EmbedGate Community".into(),
        }
    }
}

impl SiteConfig {
    /// Canonical domain followed by every sub-site domain, lowercased.
    pub fn all_domains(&self) -> Vec<String> {
        std::iter::once(&self.canonical_domain)
            .chain(&self.subsite_domains)
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect()
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.validator;
        for (name, value) in [
            ("connect_timeout_ms", v.connect_timeout_ms),
            ("read_timeout_ms", v.read_timeout_ms),
            ("dns_timeout_ms", v.dns_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!(
                    "validator.{name} must be greater than zero"
                )));
            }
        }
        if v.product.trim().is_empty() {
            return Err(ConfigError::Validation(
                "validator.product must not be empty".into(),
            ));
        }
        if self.site.canonical_domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.canonical_domain must not be empty".into(),
            ));
        }
        Ok(())
    }
}
