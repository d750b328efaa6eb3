//! Raw tag input → candidate URL and mode flags.

use scraper::Html;

use crate::error::ResolveError;

/// Keyword that restricts resolution to the minimal allow-list.
pub const MINIMAL_KEYWORD: &str = "minimal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedInput {
    pub url: String,
    pub minimal: bool,
}

/// Drop HTML markup, keeping text content. Entities are decoded.
///
/// Tags are removed without leaving a separator, so markup inside a URL
/// does not split it.
pub fn strip_markup(raw: &str) -> String {
    Html::parse_fragment(raw).root_element().text().collect()
}

fn is_http_token(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Extract the candidate URL: the first http(s) token, otherwise the
/// first token other than the `minimal` keyword.
pub fn parse_input(raw: &str) -> Result<EmbedInput, ResolveError> {
    let text = strip_markup(raw);
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let minimal = tokens.contains(&MINIMAL_KEYWORD);

    let url = tokens
        .iter()
        .find(|token| is_http_token(token))
        .or_else(|| tokens.iter().find(|token| **token != MINIMAL_KEYWORD))
        .ok_or(ResolveError::EmptyInput)?;

    Ok(EmbedInput {
        url: (*url).to_string(),
        minimal,
    })
}
