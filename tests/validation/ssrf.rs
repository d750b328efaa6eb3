use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use embedgate::Config;
use embedgate::validation::{InvalidReason, LinkValidator, ValidationOutcome};

use crate::harness::test_validator;

#[tokio::test]
async fn internal_literals_rejected_with_default_classifier() {
    let validator = LinkValidator::from_config(&Config::default()).unwrap();
    for url in [
        "http://127.0.0.1:4567/admin",
        "http://10.0.0.5/",
        "http://169.254.1.1/",
        "http://[::1]/",
        "http://192.168.0.10:8080/router",
        "http://[fd00::1]/",
    ] {
        assert_eq!(
            validator.validate(url).await,
            ValidationOutcome::invalid(InvalidReason::InternalAddress),
            "{url}"
        );
    }
}

#[tokio::test]
async fn internal_host_gets_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // "localhost" reaches the mock server if the classifier is bypassed.
    let (validator, classifier) = test_validator(&["localhost"]);
    let url = format!("http://localhost:{}/admin", server.address().port());

    assert_eq!(
        validator.validate(&url).await,
        ValidationOutcome::invalid(InvalidReason::InternalAddress)
    );
    assert_eq!(classifier.calls(), 1);
    server.verify().await;
}

#[tokio::test]
async fn redirect_into_internal_address_is_rejected() {
    let server = MockServer::start().await;
    let port = server.address().port();
    Mock::given(method("HEAD"))
        .and(path("/public"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("http://localhost:{port}/secret")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (validator, classifier) = test_validator(&["localhost"]);
    let outcome = validator
        .validate(&format!("{}/public", server.uri()))
        .await;

    assert_eq!(
        outcome,
        ValidationOutcome::invalid(InvalidReason::InternalAddress)
    );
    assert_eq!(classifier.calls(), 2);
    server.verify().await;
}

#[tokio::test]
async fn rate_limited_platforms_need_no_classification() {
    let (validator, classifier) = test_validator(&[]);
    let url = "https://x.com/someuser/status/123";
    assert_eq!(validator.validate(url).await, ValidationOutcome::valid(url));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn every_attempt_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (validator, classifier) = test_validator(&[]);
    let outcome = validator.validate(&format!("{}/m", server.uri())).await;

    assert!(outcome.is_valid());
    assert_eq!(classifier.calls(), 2);
}

#[tokio::test]
async fn connect_time_resolution_refuses_internal_addresses() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // The classifier passes "localhost"; the client's resolver must still refuse it.
    let (validator, classifier) = test_validator(&[]);
    let url = format!("http://localhost:{}/rebound", server.address().port());

    assert_eq!(
        validator.validate(&url).await,
        ValidationOutcome::invalid(InvalidReason::ConnectionFailed)
    );
    assert_eq!(classifier.calls(), 1);
    server.verify().await;
}
