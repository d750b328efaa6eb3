//! Collaborators describing the local deployment: which hosts it serves and
//! which content paths exist on it.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hostnames served by this deployment: the canonical domain plus one per sub-site.
pub trait DeploymentDomains: Send + Sync {
    fn current_domains(&self) -> Vec<String>;
}

/// Content lookup by URL path, e.g. a database query on the articles table.
pub trait ArticleLookup: Send + Sync {
    fn find_article_by_path<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<ArticleId>> + Send + 'a>>;
}

/// Fixed domain list, usually built from [`SiteConfig`].
#[derive(Debug, Clone, Default)]
pub struct StaticDomains {
    domains: Vec<String>,
}

impl StaticDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.into().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(site.all_domains())
    }
}

impl DeploymentDomains for StaticDomains {
    fn current_domains(&self) -> Vec<String> {
        self.domains.clone()
    }
}

/// Path → article map held in memory.
#[derive(Debug, Default)]
pub struct InMemoryArticles {
    by_path: RwLock<HashMap<String, ArticleId>>,
}

impl InMemoryArticles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<String>, id: ArticleId) {
        let mut map = self
            .by_path
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.insert(path.into(), id);
    }

    pub fn with_article(self, path: impl Into<String>, id: ArticleId) -> Self {
        self.insert(path, id);
        self
    }
}

impl ArticleLookup for InMemoryArticles {
    fn find_article_by_path<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<ArticleId>> + Send + 'a>> {
        let found = self
            .by_path
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(path)
            .copied();
        Box::pin(async move { found })
    }
}
