pub mod builtin;
pub mod handler;
pub mod parsers;
pub mod registry;
pub mod site;

pub use handler::{
    EmbedHandler, HandlerId, HandlerMatch, IframeEmbed, InternalLinkEmbed, LinkPreviewEmbed,
    MINIMAL_ALLOWED, ParseContext, SocialEmbed, build_handler,
};
pub use parsers::{EmbedParsers, EmbedUrlParser};
pub use registry::{Registry, RegistryEntry};
pub use site::{ArticleId, ArticleLookup, DeploymentDomains, InMemoryArticles, StaticDomains};
