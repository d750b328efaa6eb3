use super::handler::HandlerId;
use super::registry::Registry;
use crate::error::RegistryError;

/// Built-in handlers as `(pattern, handler, skip_validation)`.
///
/// Order is load-bearing: the first matching pattern wins.
pub const BUILTIN_HANDLERS: &[(&str, HandlerId, bool)] = &[
    (
        r"(?i)^https?://(?:www\.|m\.)?(?:youtube\.com/(?:watch\?|embed/|shorts/|live/)|youtu\.be/)",
        HandlerId::Youtube,
        false,
    ),
    (
        r"(?i)^https?://(?:www\.|clips\.)?twitch\.tv/",
        HandlerId::Twitch,
        false,
    ),
    (
        r"(?i)^https?://(?:player|stream)\.mux\.com/",
        HandlerId::Mux,
        false,
    ),
    (
        r"(?i)^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/\w+/status/\d+",
        HandlerId::Twitter,
        false,
    ),
    (
        r"(?i)^https?://bsky\.app/profile/[^/\s]+/post/[^/\s]+",
        HandlerId::Bluesky,
        false,
    ),
    (
        r"(?i)^https?://codepen\.io/[^/\s]+/(?:pen|embed|full)/",
        HandlerId::Codepen,
        false,
    ),
    // Not an http(s) target, so there is nothing to probe.
    (
        r"^spotify:(?:track|album|playlist|episode|show|artist):[A-Za-z0-9]+$",
        HandlerId::Spotify,
        true,
    ),
];

pub fn register_builtin(registry: &Registry) -> Result<(), RegistryError> {
    for (pattern, handler, skip_validation) in BUILTIN_HANDLERS {
        registry.register_pattern(pattern, *handler, *skip_validation)?;
    }
    Ok(())
}
