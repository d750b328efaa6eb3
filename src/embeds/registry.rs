use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use regex::Regex;
use url::Url;

use super::handler::{HandlerId, HandlerMatch};
use super::site::{ArticleId, ArticleLookup, DeploymentDomains};
use crate::error::RegistryError;

#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub pattern: Regex,
    pub handler: HandlerId,
    pub skip_validation: bool,
}

/// Ordered embed-handler table.
///
/// Entries are consulted in registration order and the first match wins.
/// Lookups read an `ArcSwap` snapshot and never block; registration is
/// serialized by its own mutex and publishes a fresh snapshot.
pub struct Registry {
    entries: ArcSwap<Vec<RegistryEntry>>,
    write_lock: Mutex<()>,
    domains: Arc<dyn DeploymentDomains>,
    articles: Arc<dyn ArticleLookup>,
}

impl Registry {
    pub fn new(domains: Arc<dyn DeploymentDomains>, articles: Arc<dyn ArticleLookup>) -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
            write_lock: Mutex::new(()),
            domains,
            articles,
        }
    }

    /// Registry pre-populated with the built-in handlers.
    pub fn with_builtin(
        domains: Arc<dyn DeploymentDomains>,
        articles: Arc<dyn ArticleLookup>,
    ) -> Result<Self, RegistryError> {
        let registry = Self::new(domains, articles);
        super::builtin::register_builtin(&registry)?;
        Ok(registry)
    }

    pub fn register(&self, pattern: Regex, handler: HandlerId, skip_validation: bool) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::clone(&self.entries.load());
        next.push(RegistryEntry {
            pattern,
            handler,
            skip_validation,
        });
        self.entries.store(Arc::new(next));
        tracing::debug!(%handler, skip_validation, "embed handler registered");
    }

    /// Compile `pattern` and register it.
    pub fn register_pattern(
        &self,
        pattern: &str,
        handler: HandlerId,
        skip_validation: bool,
    ) -> Result<(), RegistryError> {
        let regex = Regex::new(pattern)
            .map_err(|source| RegistryError::InvalidPattern { handler, source })?;
        self.register(regex, handler, skip_validation);
        Ok(())
    }

    /// Snapshot of the current entries, in registration order.
    pub fn entries(&self) -> Arc<Vec<RegistryEntry>> {
        self.entries.load_full()
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-validation lookup. `None` means no specific handler matched.
    pub async fn find_handler_for(&self, link: &str) -> Option<HandlerMatch> {
        if let Some(article) = self.same_instance_article(link).await {
            tracing::debug!(link = %link, %article, "same-instance article link");
            return Some(HandlerMatch::internal_link(article));
        }

        self.entries
            .load()
            .iter()
            .find(|entry| entry.pattern.is_match(link))
            .map(|entry| HandlerMatch::new(entry.handler, entry.skip_validation))
    }

    /// Like [`Self::find_handler_for`], falling back to the link preview handler.
    pub async fn find_liquid_tag_for(&self, link: &str) -> HandlerMatch {
        self.find_handler_for(link)
            .await
            .unwrap_or_else(HandlerMatch::link_preview)
    }

    async fn same_instance_article(&self, link: &str) -> Option<ArticleId> {
        let url = Url::parse(link.trim()).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        if !serves_host(&url, &self.domains.current_domains()) {
            return None;
        }
        let path = content_path(&url)?;
        self.articles.find_article_by_path(path).await
    }
}

/// True when the URL's host, or `host:port`, is one of `domains`.
fn serves_host(url: &Url, domains: &[String]) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    let authority = url.port().map(|port| format!("{host}:{port}"));
    domains.iter().any(|domain| {
        let domain = domain.to_ascii_lowercase();
        domain == host || authority.as_deref() == Some(domain.as_str())
    })
}

/// URL path without a trailing slash; `None` for the site root.
fn content_path(url: &Url) -> Option<&str> {
    let path = url.path();
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    (!trimmed.is_empty()).then_some(trimmed)
}
