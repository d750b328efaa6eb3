use serde::Serialize;

/// Why a URL was rejected as invalid.
///
/// The reason is logged and available to library callers; user-facing
/// messages collapse every variant into a single "invalid URL" message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "status")]
pub enum InvalidReason {
    Malformed,
    UnsupportedScheme,
    InternalAddress,
    /// Redirect without a usable `Location` header.
    BadRedirect,
    UnexpectedStatus(u16),
    ConnectionFailed,
    TimedOut,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => f.write_str("malformed"),
            Self::UnsupportedScheme => f.write_str("unsupported scheme"),
            Self::InternalAddress => f.write_str("internal address blocked"),
            Self::BadRedirect => f.write_str("redirect without usable location"),
            Self::UnexpectedStatus(code) => write!(f, "unexpected status {code}"),
            Self::ConnectionFailed => f.write_str("connection failed"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

/// Terminal result of one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ValidationOutcome {
    /// The link is embeddable. Carries the final URL after any redirects.
    Valid { url: String },
    NotFound,
    TooManyRedirects,
    /// The server answered 405 to both HEAD and GET.
    MethodFallbackExhausted,
    InvalidUrl { reason: InvalidReason },
}

impl ValidationOutcome {
    pub fn valid(url: impl Into<String>) -> Self {
        Self::Valid { url: url.into() }
    }

    pub fn invalid(reason: InvalidReason) -> Self {
        Self::InvalidUrl { reason }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn valid_url(&self) -> Option<&str> {
        match self {
            Self::Valid { url } => Some(url),
            _ => None,
        }
    }
}

impl std::fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid { url } => write!(f, "valid: {url}"),
            Self::NotFound => f.write_str("not found"),
            Self::TooManyRedirects => f.write_str("too many redirects"),
            Self::MethodFallbackExhausted => f.write_str("method not allowed"),
            Self::InvalidUrl { reason } => write!(f, "invalid URL: {reason}"),
        }
    }
}
