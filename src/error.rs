use thiserror::Error;

use crate::embeds::HandlerId;
use crate::validation::ValidationOutcome;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `EmbedGate`.
///
/// The validator itself never errors; it returns a `ValidationOutcome`.
/// Errors here come from configuration, registration, and the single
/// user-facing failure point in embed resolution.
#[derive(Debug, Error)]
pub enum EmbedGateError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Registry ─────────────────────────────────────────────────────────
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    // ── Resolution ───────────────────────────────────────────────────────
    #[error("resolve: {0}")]
    Resolve(#[from] ResolveError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Registry errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid pattern for {handler}: {source}")]
    InvalidPattern {
        handler: HandlerId,
        #[source]
        source: regex::Error,
    },
}

// ─── Validation failures (user-facing) ───────────────────────────────────────

/// What an end user is told when a link fails validation.
///
/// Blocked internal addresses, connection errors, and unexpected statuses
/// all surface as `InvalidUrl` so the blocking policy cannot be probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Invalid URL provided")]
    InvalidUrl,

    #[error("URL provided was not found")]
    NotFound,

    #[error("URL provided has too many redirects")]
    TooManyRedirects,
}

impl ValidationFailure {
    /// Localization key for the user-facing message.
    pub fn message_key(self) -> &'static str {
        match self {
            Self::InvalidUrl => "embeds.errors.invalid_url",
            Self::NotFound => "embeds.errors.not_found",
            Self::TooManyRedirects => "embeds.errors.too_many_redirects",
        }
    }

    /// Map a non-valid outcome to its user-facing failure. `None` for `Valid`.
    pub fn from_outcome(outcome: &ValidationOutcome) -> Option<Self> {
        match outcome {
            ValidationOutcome::Valid { .. } => None,
            ValidationOutcome::NotFound => Some(Self::NotFound),
            ValidationOutcome::TooManyRedirects => Some(Self::TooManyRedirects),
            ValidationOutcome::MethodFallbackExhausted | ValidationOutcome::InvalidUrl { .. } => {
                Some(Self::InvalidUrl)
            }
        }
    }
}

// ─── Resolution errors ───────────────────────────────────────────────────────

/// Failure of a single embed tag. The surrounding document keeps rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no URL provided")]
    EmptyInput,

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("{handler} cannot embed {url}")]
    UnsupportedEmbed { handler: HandlerId, url: String },
}

impl ResolveError {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::EmptyInput => "embeds.errors.empty_input",
            Self::Validation(failure) => failure.message_key(),
            Self::UnsupportedEmbed { .. } => "embeds.errors.unsupported_embed",
        }
    }
}
