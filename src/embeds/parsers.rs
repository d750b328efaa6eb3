//! Site-specific extraction of embeddable player URLs.
//!
//! Every parser checks its own host and returns `None` for anything it
//! does not recognise.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::handler::HandlerId;

static YOUTUBE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid regex"));
static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));
static SPOTIFY_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^spotify:(track|album|playlist|episode|show|artist):([A-Za-z0-9]+)$")
        .expect("valid regex")
});

pub trait EmbedUrlParser: Send + Sync {
    fn parse(&self, url: &str) -> Option<String>;
}

fn http_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn host_of(url: &Url) -> Option<String> {
    url.host_str().map(str::to_ascii_lowercase)
}

fn segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct YoutubeParser;

impl EmbedUrlParser for YoutubeParser {
    fn parse(&self, raw: &str) -> Option<String> {
        let url = http_url(raw)?;
        let host = host_of(&url)?;
        let segs = segments(&url);
        let id = match host.as_str() {
            "youtu.be" => segs.first().map(|s| (*s).to_string()),
            "youtube.com" | "www.youtube.com" | "m.youtube.com" => match segs.as_slice() {
                ["watch"] => url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned()),
                ["embed" | "shorts" | "live", id, ..] => Some((*id).to_string()),
                _ => None,
            },
            _ => None,
        }?;
        YOUTUBE_ID
            .is_match(&id)
            .then(|| format!("https://www.youtube.com/embed/{id}"))
    }
}

/// Twitch players refuse to load unless `parent` names the embedding host.
#[derive(Debug, Clone)]
pub struct TwitchParser {
    parent: String,
}

impl TwitchParser {
    /// `parent_domain` may carry a port; only the host part is used.
    pub fn new(parent_domain: &str) -> Self {
        let parent = parent_domain
            .split(':')
            .next()
            .unwrap_or(parent_domain)
            .to_ascii_lowercase();
        Self { parent }
    }
}

impl EmbedUrlParser for TwitchParser {
    fn parse(&self, raw: &str) -> Option<String> {
        let url = http_url(raw)?;
        let host = host_of(&url)?;
        let segs = segments(&url);
        let parent = &self.parent;
        match (host.as_str(), segs.as_slice()) {
            ("clips.twitch.tv", [slug]) | ("twitch.tv" | "www.twitch.tv", [_, "clip", slug])
                if SLUG.is_match(slug) =>
            {
                Some(format!(
                    "https://clips.twitch.tv/embed?clip={slug}&parent={parent}"
                ))
            }
            ("twitch.tv" | "www.twitch.tv", ["videos", id])
                if id.chars().all(|c| c.is_ascii_digit()) =>
            {
                Some(format!("https://player.twitch.tv/?video={id}&parent={parent}"))
            }
            ("twitch.tv" | "www.twitch.tv", [channel]) if SLUG.is_match(channel) => Some(format!(
                "https://player.twitch.tv/?channel={channel}&parent={parent}"
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MuxParser;

impl EmbedUrlParser for MuxParser {
    fn parse(&self, raw: &str) -> Option<String> {
        let url = http_url(raw)?;
        let host = host_of(&url)?;
        if host != "player.mux.com" && host != "stream.mux.com" {
            return None;
        }
        let first = *segments(&url).first()?;
        let id = first.strip_suffix(".m3u8").unwrap_or(first);
        (!id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()))
            .then(|| format!("https://player.mux.com/{id}"))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CodepenParser;

impl EmbedUrlParser for CodepenParser {
    fn parse(&self, raw: &str) -> Option<String> {
        let url = http_url(raw)?;
        if host_of(&url)? != "codepen.io" {
            return None;
        }
        match segments(&url).as_slice() {
            [user, "pen" | "embed" | "full", id, ..] if SLUG.is_match(user) && SLUG.is_match(id) => {
                Some(format!(
                    "https://codepen.io/{user}/embed/{id}?default-tab=result"
                ))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SpotifyParser;

impl EmbedUrlParser for SpotifyParser {
    fn parse(&self, raw: &str) -> Option<String> {
        let caps = SPOTIFY_URI.captures(raw.trim())?;
        Some(format!(
            "https://open.spotify.com/embed/{}/{}",
            &caps[1], &caps[2]
        ))
    }
}

/// One parser per iframe-backed handler.
#[derive(Debug, Clone)]
pub struct EmbedParsers {
    youtube: YoutubeParser,
    twitch: TwitchParser,
    mux: MuxParser,
    codepen: CodepenParser,
    spotify: SpotifyParser,
}

impl EmbedParsers {
    pub fn new(canonical_domain: &str) -> Self {
        Self {
            youtube: YoutubeParser,
            twitch: TwitchParser::new(canonical_domain),
            mux: MuxParser,
            codepen: CodepenParser,
            spotify: SpotifyParser,
        }
    }

    /// Parser for handlers rendered as iframes; `None` for every other handler.
    pub fn parser_for(&self, handler: HandlerId) -> Option<&dyn EmbedUrlParser> {
        match handler {
            HandlerId::Youtube => Some(&self.youtube),
            HandlerId::Twitch => Some(&self.twitch),
            HandlerId::Mux => Some(&self.mux),
            HandlerId::Codepen => Some(&self.codepen),
            HandlerId::Spotify => Some(&self.spotify),
            HandlerId::InternalLink
            | HandlerId::LinkPreview
            | HandlerId::Twitter
            | HandlerId::Bluesky => None,
        }
    }
}
