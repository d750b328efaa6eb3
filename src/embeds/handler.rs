use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::parsers::EmbedParsers;
use super::site::ArticleId;
use crate::error::ResolveError;

/// Every embed kind the resolver can produce.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HandlerId {
    /// Link to content on this deployment, answered from the local database.
    InternalLink,
    /// Generic rich link card; the fallback when nothing else matches.
    LinkPreview,
    Youtube,
    Twitch,
    Mux,
    Twitter,
    Bluesky,
    Codepen,
    Spotify,
}

/// Handlers allowed in minimal mode.
pub const MINIMAL_ALLOWED: &[HandlerId] = &[HandlerId::InternalLink];

impl HandlerId {
    pub fn allowed_in_minimal(self) -> bool {
        MINIMAL_ALLOWED.contains(&self)
    }
}

/// A registry decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandlerMatch {
    pub handler: HandlerId,
    pub skip_validation: bool,
    /// Set only for [`HandlerId::InternalLink`].
    pub article: Option<ArticleId>,
}

impl HandlerMatch {
    pub fn new(handler: HandlerId, skip_validation: bool) -> Self {
        Self {
            handler,
            skip_validation,
            article: None,
        }
    }

    pub fn internal_link(article: ArticleId) -> Self {
        Self {
            handler: HandlerId::InternalLink,
            skip_validation: true,
            article: Some(article),
        }
    }

    pub fn link_preview() -> Self {
        Self::new(HandlerId::LinkPreview, false)
    }
}

/// Opaque state handed through from the markup layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseContext {
    /// Identifier of the document being parsed.
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ParseContext {
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            attributes: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalLinkEmbed {
    pub tag_name: String,
    pub url: String,
    pub article: ArticleId,
    pub context: ParseContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPreviewEmbed {
    pub tag_name: String,
    pub url: String,
    pub context: ParseContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IframeEmbed {
    pub tag_name: String,
    pub provider: HandlerId,
    pub url: String,
    /// Player URL produced by the provider's parser.
    pub src: String,
    pub context: ParseContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialEmbed {
    pub tag_name: String,
    pub provider: HandlerId,
    pub url: String,
    pub context: ParseContext,
}

/// An instantiated embed handler, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbedHandler {
    InternalLink(InternalLinkEmbed),
    LinkPreview(LinkPreviewEmbed),
    Iframe(IframeEmbed),
    Social(SocialEmbed),
}

impl EmbedHandler {
    pub fn handler_id(&self) -> HandlerId {
        match self {
            Self::InternalLink(_) => HandlerId::InternalLink,
            Self::LinkPreview(_) => HandlerId::LinkPreview,
            Self::Iframe(e) => e.provider,
            Self::Social(e) => e.provider,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::InternalLink(e) => &e.url,
            Self::LinkPreview(e) => &e.url,
            Self::Iframe(e) => &e.url,
            Self::Social(e) => &e.url,
        }
    }

    pub fn tag_name(&self) -> &str {
        match self {
            Self::InternalLink(e) => &e.tag_name,
            Self::LinkPreview(e) => &e.tag_name,
            Self::Iframe(e) => &e.tag_name,
            Self::Social(e) => &e.tag_name,
        }
    }
}

/// Instantiate the handler chosen by the registry.
pub fn build_handler(
    selected: &HandlerMatch,
    tag_name: &str,
    link: &str,
    context: &ParseContext,
    parsers: &EmbedParsers,
) -> Result<EmbedHandler, ResolveError> {
    let tag_name = tag_name.to_string();
    let url = link.to_string();
    let context = context.clone();
    let unsupported = || ResolveError::UnsupportedEmbed {
        handler: selected.handler,
        url: link.to_string(),
    };

    let handler = match selected.handler {
        HandlerId::InternalLink => EmbedHandler::InternalLink(InternalLinkEmbed {
            tag_name,
            url,
            article: selected.article.ok_or_else(unsupported)?,
            context,
        }),
        HandlerId::LinkPreview => EmbedHandler::LinkPreview(LinkPreviewEmbed {
            tag_name,
            url,
            context,
        }),
        provider @ (HandlerId::Twitter | HandlerId::Bluesky) => {
            EmbedHandler::Social(SocialEmbed {
                tag_name,
                provider,
                url,
                context,
            })
        }
        provider @ (HandlerId::Youtube
        | HandlerId::Twitch
        | HandlerId::Mux
        | HandlerId::Codepen
        | HandlerId::Spotify) => {
            let src = parsers
                .parser_for(provider)
                .and_then(|parser| parser.parse(link))
                .ok_or_else(unsupported)?;
            EmbedHandler::Iframe(IframeEmbed {
                tag_name,
                provider,
                url,
                src,
                context,
            })
        }
    };
    Ok(handler)
}
