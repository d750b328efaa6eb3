use anyhow::{Result, bail};
use serde_json::json;
use std::sync::Arc;

use crate::Config;
use crate::cli::Commands;
use crate::embeds::{InMemoryArticles, ParseContext, Registry, StaticDomains};
use crate::resolver::EmbedResolver;
use crate::security::is_internal_host;
use crate::validation::LinkValidator;

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Registry for the configured deployment with the built-in handlers.
///
/// The CLI has no content database, so same-instance links never match.
pub fn build_registry(config: &Config) -> Result<Arc<Registry>> {
    let registry = Registry::with_builtin(
        Arc::new(StaticDomains::from_site(&config.site)),
        Arc::new(InMemoryArticles::new()),
    )?;
    Ok(Arc::new(registry))
}

async fn run_resolve(config: &Config, tag: &str, input: &[String]) -> Result<()> {
    let resolver = EmbedResolver::from_config(config, build_registry(config)?)?;
    let raw = input.join(" ");
    match resolver.resolve(tag, &raw, &ParseContext::for_source("cli")).await {
        Ok(handler) => print_json(&handler),
        Err(e) => {
            print_json(&json!({ "error": e.to_string(), "key": e.message_key() }))?;
            bail!("embed rejected: {e}")
        }
    }
}

async fn run_validate(config: &Config, url: &str, max_redirects: Option<u8>) -> Result<()> {
    let validator = LinkValidator::from_config(config)?;
    let budget = max_redirects.unwrap_or(validator.settings().max_redirects);
    let outcome = validator.validate_with_budget(url, budget).await;
    print_json(&outcome)
}

async fn run_classify(config: &Config, host: &str) -> Result<()> {
    let internal = is_internal_host(host, config.validator.dns_timeout()).await;
    print_json(&json!({ "host": host, "internal": internal }))
}

pub async fn dispatch(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Resolve { tag, input } => run_resolve(&config, &tag, &input).await,
        Commands::Validate { url, max_redirects } => run_validate(&config, &url, max_redirects).await,
        Commands::Classify { host } => run_classify(&config, &host).await,
    }
}
