//! Per-response decision table for the redirect-following validator.
//!
//! Kept free of I/O so every branch, including the CodePen retry, can be
//! exercised without a live host.

use reqwest::{Method, StatusCode};

use super::outcome::ValidationOutcome;

/// CodePen answers the first HEAD probe with 403; one blind retry is allowed.
const CODEPEN_HOST: &str = "codepen.io";

/// Retry budget left for the current validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopState {
    pub method: Method,
    pub hops_left: u8,
    pub get_fallback_used: bool,
    pub codepen_retry_used: bool,
}

impl HopState {
    pub fn new(max_redirects: u8) -> Self {
        Self {
            method: Method::HEAD,
            hops_left: max_redirects,
            get_fallback_used: false,
            codepen_retry_used: false,
        }
    }

    pub fn follow_redirect(&mut self) {
        self.hops_left = self.hops_left.saturating_sub(1);
    }

    pub fn fall_back_to_get(&mut self) {
        self.method = Method::GET;
        self.get_fallback_used = true;
    }

    pub fn retry_codepen(&mut self) {
        self.codepen_retry_used = true;
    }
}

/// What the validator does after receiving a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Link is valid at the current URL.
    Accept,
    Finish(ValidationOutcome),
    FollowRedirect,
    /// Same URL again with GET; does not spend a redirect hop.
    RetryWithGet,
    /// Same request again, CodePen only.
    RetrySame,
}

fn is_codepen(host: &str) -> bool {
    host.eq_ignore_ascii_case(CODEPEN_HOST)
}

pub fn next_step(status: StatusCode, host: &str, state: &HopState) -> Step {
    match status.as_u16() {
        200..=299 => Step::Accept,
        403 if is_codepen(host) && !state.codepen_retry_used => Step::RetrySame,
        // Bot walls in front of real content.
        401 | 403 => Step::Accept,
        300..=399 if state.hops_left == 0 => Step::Finish(ValidationOutcome::TooManyRedirects),
        300..=399 => Step::FollowRedirect,
        405 if state.method == Method::HEAD && !state.get_fallback_used => Step::RetryWithGet,
        405 => Step::Finish(ValidationOutcome::MethodFallbackExhausted),
        404 => Step::Finish(ValidationOutcome::NotFound),
        code => Step::Finish(ValidationOutcome::invalid(
            super::outcome::InvalidReason::UnexpectedStatus(code),
        )),
    }
}
