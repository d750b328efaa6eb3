use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::LOCATION;
use reqwest::{Method, Response};
use url::Url;

use super::outcome::{InvalidReason, ValidationOutcome};
use super::step::{HopState, Step, next_step};
use super::user_agent::build_user_agent;
use crate::config::Config;
use crate::security::{DnsHostClassifier, HostClassifier, PublicOnlyResolver};

/// Hosts that rate-limit HEAD probes; accepted without any request.
const SKIP_PROBE_HOSTS: &[&str] = &["twitter.com", "x.com", "bsky.app"];

/// Retries beyond redirects: one GET fallback plus one CodePen retry.
const EXTRA_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone)]
pub struct ValidatorSettings {
    pub max_redirects: u8,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub dns_timeout: Duration,
    pub user_agent: String,
}

impl ValidatorSettings {
    pub fn from_config(config: &Config) -> Self {
        let v = &config.validator;
        Self {
            max_redirects: v.max_redirects,
            connect_timeout: v.connect_timeout(),
            read_timeout: v.read_timeout(),
            dns_timeout: v.dns_timeout(),
            user_agent: build_user_agent(&v.product, &v.contact_url, &config.site.community_name),
        }
    }

    /// Hard deadline for one `validate` call with the given redirect budget.
    pub fn wall_clock_bound(&self, max_redirects: u8) -> Duration {
        let per_attempt = self.connect_timeout + self.read_timeout + self.dns_timeout;
        per_attempt * (1 + u32::from(max_redirects) + EXTRA_ATTEMPTS)
    }
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Probes candidate embed URLs with bounded, SSRF-checked redirect following.
pub struct LinkValidator {
    client: reqwest::Client,
    classifier: Arc<dyn HostClassifier>,
    settings: ValidatorSettings,
}

impl LinkValidator {
    pub fn new(settings: ValidatorSettings, classifier: Arc<dyn HostClassifier>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .timeout(settings.connect_timeout + settings.read_timeout)
            .user_agent(settings.user_agent.as_str())
            // Redirects are followed by hand so every hop is classified.
            .redirect(reqwest::redirect::Policy::none())
            .dns_resolver(Arc::new(PublicOnlyResolver::new(settings.dns_timeout)))
            .build()?;
        Ok(Self {
            client,
            classifier,
            settings,
        })
    }

    /// Validator backed by the DNS classifier, configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = ValidatorSettings::from_config(config);
        let classifier = Arc::new(DnsHostClassifier::new(settings.dns_timeout));
        Self::new(settings, classifier)
    }

    pub fn settings(&self) -> &ValidatorSettings {
        &self.settings
    }

    /// Validate with the configured redirect budget.
    pub async fn validate(&self, url: &str) -> ValidationOutcome {
        self.validate_with_budget(url, self.settings.max_redirects)
            .await
    }

    pub async fn validate_with_budget(&self, url: &str, max_redirects: u8) -> ValidationOutcome {
        let bound = self.settings.wall_clock_bound(max_redirects);
        let outcome = match tokio::time::timeout(bound, self.follow(url, max_redirects)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::info!(url = %url, bound_ms = bound.as_millis(), "validation deadline exceeded");
                ValidationOutcome::invalid(InvalidReason::TimedOut)
            }
        };
        tracing::debug!(url = %url, outcome = %outcome, "link validated");
        outcome
    }

    async fn follow(&self, url: &str, max_redirects: u8) -> ValidationOutcome {
        let Ok(mut current) = Url::parse(url.trim()) else {
            return ValidationOutcome::invalid(InvalidReason::Malformed);
        };
        if !is_http(&current) {
            return ValidationOutcome::invalid(InvalidReason::UnsupportedScheme);
        }
        match current.host_str() {
            None => return ValidationOutcome::invalid(InvalidReason::Malformed),
            Some(host) if SKIP_PROBE_HOSTS.contains(&host) => {
                return ValidationOutcome::valid(url);
            }
            Some(_) => {}
        }

        let mut state = HopState::new(max_redirects);
        let mut redirected = false;

        loop {
            let Some(host) = current.host_str().map(str::to_owned) else {
                return ValidationOutcome::invalid(InvalidReason::Malformed);
            };
            if self.classifier.is_internal(&host).await {
                tracing::warn!(url = %current, "refusing to probe internal address");
                return ValidationOutcome::invalid(InvalidReason::InternalAddress);
            }

            let response = match self.probe(state.method.clone(), &current).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!(url = %current, error = %e, "probe failed");
                    let reason = if e.is_timeout() {
                        InvalidReason::TimedOut
                    } else {
                        InvalidReason::ConnectionFailed
                    };
                    return ValidationOutcome::invalid(reason);
                }
            };

            let status = response.status();
            tracing::debug!(
                url = %current,
                method = %state.method,
                status = status.as_u16(),
                hops_left = state.hops_left,
                "probe response"
            );

            match next_step(status, &host, &state) {
                Step::Accept => {
                    let final_url = if redirected {
                        current.to_string()
                    } else {
                        url.to_string()
                    };
                    return ValidationOutcome::valid(final_url);
                }
                Step::Finish(outcome) => return outcome,
                Step::FollowRedirect => {
                    let Some(next) = redirect_target(&current, &response) else {
                        return ValidationOutcome::invalid(InvalidReason::BadRedirect);
                    };
                    if !is_http(&next) {
                        return ValidationOutcome::invalid(InvalidReason::UnsupportedScheme);
                    }
                    state.follow_redirect();
                    current = next;
                    redirected = true;
                }
                Step::RetryWithGet => state.fall_back_to_get(),
                Step::RetrySame => state.retry_codepen(),
            }
        }
    }

    /// One request; the body is never read.
    async fn probe(&self, method: Method, url: &Url) -> reqwest::Result<Response> {
        self.client.request(method, url.clone()).send().await
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Resolve `Location` against the URL that produced it.
fn redirect_target(current: &Url, response: &Response) -> Option<Url> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    current.join(location.trim()).ok()
}
