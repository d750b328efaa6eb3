use std::sync::Arc;
use std::time::{Duration, Instant};

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use embedgate::validation::{InvalidReason, ValidationOutcome};

use crate::harness::{StalledClassifier, fast_settings, test_validator, validator_with};

#[tokio::test]
async fn stalled_validation_ends_at_deadline() {
    let settings = fast_settings();
    let bound = settings.wall_clock_bound(settings.max_redirects);
    let validator = validator_with(settings, Arc::new(StalledClassifier));

    let started = Instant::now();
    let outcome = validator.validate("https://stalls.example/").await;

    assert_eq!(outcome, ValidationOutcome::invalid(InvalidReason::TimedOut));
    assert!(started.elapsed() >= bound);
    assert!(started.elapsed() < bound + Duration::from_secs(2));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let (validator, _) = test_validator(&[]);
    let outcome = validator.validate(&format!("{}/slow", server.uri())).await;

    assert_eq!(outcome, ValidationOutcome::invalid(InvalidReason::TimedOut));
}

#[tokio::test]
async fn refused_connection_is_invalid() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let (validator, _) = test_validator(&[]);
    let outcome = validator
        .validate(&format!("http://127.0.0.1:{port}/gone"))
        .await;

    assert_eq!(
        outcome,
        ValidationOutcome::invalid(InvalidReason::ConnectionFailed)
    );
}
