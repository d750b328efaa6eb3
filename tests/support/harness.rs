#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use embedgate::embeds::{ArticleId, EmbedParsers, InMemoryArticles, Registry, StaticDomains};
use embedgate::security::HostClassifier;
use embedgate::validation::{LinkValidator, ValidatorSettings};
use embedgate::EmbedResolver;

pub const TEST_USER_AGENT: &str = "EmbedGate/0.1.0 (+https://example.org/bot) Test-Community";

/// Treats only the named hosts as internal, so the loopback mock server
/// stays reachable. Counts every classification, which happens once per
/// outbound request.
pub struct NamedInternalHosts {
    internal: Vec<String>,
    calls: AtomicUsize,
}

impl NamedInternalHosts {
    pub fn new(internal: &[&str]) -> Self {
        Self {
            internal: internal.iter().map(|h| (*h).to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HostClassifier for NamedInternalHosts {
    fn is_internal<'a>(&'a self, host: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let internal = self.internal.iter().any(|h| h == host);
        Box::pin(async move { internal })
    }
}

/// Never answers; only the overall deadline ends validation.
pub struct StalledClassifier;

impl HostClassifier for StalledClassifier {
    fn is_internal<'a>(&'a self, _host: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(std::future::pending())
    }
}

pub fn fast_settings() -> ValidatorSettings {
    ValidatorSettings {
        max_redirects: 3,
        connect_timeout: Duration::from_millis(500),
        read_timeout: Duration::from_millis(500),
        dns_timeout: Duration::from_millis(100),
        user_agent: TEST_USER_AGENT.to_string(),
    }
}

pub fn validator_with(
    settings: ValidatorSettings,
    classifier: Arc<dyn HostClassifier>,
) -> LinkValidator {
    LinkValidator::new(settings, classifier).unwrap()
}

/// Validator plus a handle on its classifier for call counting.
pub fn test_validator(internal: &[&str]) -> (LinkValidator, Arc<NamedInternalHosts>) {
    let classifier = Arc::new(NamedInternalHosts::new(internal));
    let validator = validator_with(fast_settings(), classifier.clone());
    (validator, classifier)
}

pub const SITE_DOMAIN: &str = "forem.example";
pub const ARTICLE_PATH: &str = "/ben/hello-world-4k2j";
pub const ARTICLE_ID: ArticleId = ArticleId(1001);

pub fn site_registry() -> Registry {
    let articles = InMemoryArticles::new().with_article(ARTICLE_PATH, ARTICLE_ID);
    Registry::with_builtin(
        Arc::new(StaticDomains::new([SITE_DOMAIN, "rust.forem.example"])),
        Arc::new(articles),
    )
    .unwrap()
}

pub fn resolver_with(registry: Registry, validator: LinkValidator) -> EmbedResolver {
    EmbedResolver::new(
        Arc::new(registry),
        Arc::new(validator),
        EmbedParsers::new(SITE_DOMAIN),
    )
}
