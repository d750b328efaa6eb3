use std::sync::Arc;

use anyhow::Result;

use super::input::parse_input;
use crate::config::Config;
use crate::embeds::{EmbedHandler, EmbedParsers, HandlerMatch, ParseContext, Registry, build_handler};
use crate::error::{ResolveError, ValidationFailure};
use crate::validation::LinkValidator;

/// Entry point for the markup layer: one call per embed tag.
pub struct EmbedResolver {
    registry: Arc<Registry>,
    validator: Arc<LinkValidator>,
    parsers: EmbedParsers,
}

impl EmbedResolver {
    pub fn new(registry: Arc<Registry>, validator: Arc<LinkValidator>, parsers: EmbedParsers) -> Self {
        Self {
            registry,
            validator,
            parsers,
        }
    }

    /// Resolver with a DNS-backed validator and parsers for the configured site.
    pub fn from_config(config: &Config, registry: Arc<Registry>) -> Result<Self> {
        let validator = Arc::new(LinkValidator::from_config(config)?);
        let parsers = EmbedParsers::new(&config.site.canonical_domain);
        Ok(Self::new(registry, validator, parsers))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn validator(&self) -> &LinkValidator {
        &self.validator
    }

    /// Resolve raw tag input to an instantiated embed handler.
    ///
    /// Fails only for this tag: empty input, a link that does not validate,
    /// or a handler whose parser rejects the link.
    pub async fn resolve(
        &self,
        tag_name: &str,
        raw_input: &str,
        context: &ParseContext,
    ) -> Result<EmbedHandler, ResolveError> {
        let input = parse_input(raw_input)?;
        let pre = self.registry.find_handler_for(&input.url).await;
        tracing::debug!(
            url = %input.url,
            minimal = input.minimal,
            pre_handler = ?pre.map(|m| m.handler),
            "resolving embed"
        );

        let link = if pre.is_some_and(|m| m.skip_validation) {
            input.url.clone()
        } else {
            let outcome = self.validator.validate(&input.url).await;
            match ValidationFailure::from_outcome(&outcome) {
                None => outcome
                    .valid_url()
                    .map_or_else(|| input.url.clone(), str::to_string),
                Some(failure) => {
                    tracing::info!(url = %input.url, outcome = %outcome, "embed link rejected");
                    return Err(failure.into());
                }
            }
        };

        let selected = if input.minimal {
            pre.filter(|m| m.handler.allowed_in_minimal())
                .unwrap_or_else(HandlerMatch::link_preview)
        } else {
            self.registry.find_liquid_tag_for(&link).await
        };

        build_handler(&selected, tag_name, &link, context, &self.parsers)
    }
}
