use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use embedgate::embeds::{EmbedHandler, HandlerId, ParseContext};

use crate::harness::{
    ARTICLE_ID, ARTICLE_PATH, SITE_DOMAIN, resolver_with, site_registry, test_validator,
};

async fn ok_server(at: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn tweet_resolves_without_outbound_request() {
    let (validator, classifier) = test_validator(&[]);
    let resolver = resolver_with(site_registry(), validator);

    let handler = resolver
        .resolve("embed", "https://x.com/someuser/status/123", &ParseContext::default())
        .await
        .unwrap();

    let social = match handler {
        EmbedHandler::Social(social) => social,
        other => panic!("expected social embed, got {other:?}"),
    };
    assert_eq!(social.provider, HandlerId::Twitter);
    assert_eq!(social.url, "https://x.com/someuser/status/123");
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn same_instance_article_bypasses_validation() {
    let (validator, classifier) = test_validator(&[]);
    let resolver = resolver_with(site_registry(), validator);
    let link = format!("https://{SITE_DOMAIN}{ARTICLE_PATH}");

    for input in [link.clone(), format!("{link} minimal")] {
        let handler = resolver
            .resolve("embed", &input, &ParseContext::for_source("post-7"))
            .await
            .unwrap();
        let internal = match handler {
            EmbedHandler::InternalLink(internal) => internal,
            other => panic!("expected internal link, got {other:?}"),
        };
        assert_eq!(internal.article, ARTICLE_ID);
        assert_eq!(internal.url, link);
        assert_eq!(internal.context.source.as_deref(), Some("post-7"));
    }
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn article_path_on_foreign_host_is_a_preview() {
    let server = ok_server(ARTICLE_PATH).await;
    let (validator, classifier) = test_validator(&[]);
    let resolver = resolver_with(site_registry(), validator);
    let link = format!("{}{ARTICLE_PATH}", server.uri());

    let handler = resolver
        .resolve("embed", &link, &ParseContext::default())
        .await
        .unwrap();

    assert_eq!(handler.handler_id(), HandlerId::LinkPreview);
    assert_eq!(handler.url(), link);
    assert_eq!(classifier.calls(), 1);
}

#[tokio::test]
async fn minimal_mode_restricts_to_allow_list() {
    let server = ok_server("/status/42").await;
    let registry = site_registry();
    registry
        .register_pattern(r"^http://127\.0\.0\.1:\d+/status/\d+$", HandlerId::Twitter, false)
        .unwrap();
    let (validator, _) = test_validator(&[]);
    let resolver = resolver_with(registry, validator);
    let link = format!("{}/status/42", server.uri());

    let full = resolver
        .resolve("embed", &link, &ParseContext::default())
        .await
        .unwrap();
    assert!(matches!(full, EmbedHandler::Social(ref s) if s.provider == HandlerId::Twitter));

    let minimal = resolver
        .resolve("embed", &format!("{link} minimal"), &ParseContext::default())
        .await
        .unwrap();
    assert_eq!(minimal.handler_id(), HandlerId::LinkPreview);
    assert_eq!(minimal.url(), link);
    assert_eq!(minimal.tag_name(), "embed");
}

#[tokio::test]
async fn handler_is_chosen_for_redirect_target() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/short"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/status/9"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/status/9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let registry = site_registry();
    registry
        .register_pattern(r"^http://127\.0\.0\.1:\d+/status/\d+$", HandlerId::Twitter, false)
        .unwrap();
    let (validator, _) = test_validator(&[]);
    let resolver = resolver_with(registry, validator);

    let handler = resolver
        .resolve("embed", &format!("{}/short", server.uri()), &ParseContext::default())
        .await
        .unwrap();

    assert_eq!(handler.handler_id(), HandlerId::Twitter);
    assert_eq!(handler.url(), format!("{}/status/9", server.uri()));
}

#[tokio::test]
async fn spotify_uri_skips_validation() {
    let (validator, classifier) = test_validator(&[]);
    let resolver = resolver_with(site_registry(), validator);

    let handler = resolver
        .resolve(
            "spotify",
            "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
            &ParseContext::default(),
        )
        .await
        .unwrap();

    let iframe = match handler {
        EmbedHandler::Iframe(iframe) => iframe,
        other => panic!("expected iframe, got {other:?}"),
    };
    assert_eq!(iframe.provider, HandlerId::Spotify);
    assert_eq!(
        iframe.src,
        "https://open.spotify.com/embed/track/4uLU6hMCjMI75M1A2tKUQC"
    );
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn markup_around_link_is_ignored() {
    let server = ok_server("/page").await;
    let (validator, _) = test_validator(&[]);
    let resolver = resolver_with(site_registry(), validator);
    let link = format!("{}/page", server.uri());

    let handler = resolver
        .resolve(
            "embed",
            &format!(r#"<a href="{link}">{link}</a>"#),
            &ParseContext::default(),
        )
        .await
        .unwrap();

    assert_eq!(handler.url(), link);
}
