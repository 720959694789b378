// Tests against a mock Yahoo profile API over real HTTP
use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yahoo_token::handlers::{token_authenticate, ProfileVerifier};
use yahoo_token::oauth::{OAuth2Client, ReqwestOAuth2Client, TransportError};
use yahoo_token::strategy::{AuthOutcome, StrategyError, YahooTokenStrategy};
use yahoo_token::testing::mock::StaticVerifier;
use yahoo_token::testing::TestFixtures;
use yahoo_token::{InternalOAuthError, ProfileError};

const PROFILE_PATH: &str = "/v1/user/1234/profile";

fn options_for(server: &MockServer) -> yahoo_token::StrategyOptions {
    TestFixtures::options().with_profile_url(format!(
        "{}/v1/user/:accountId/profile?format=json",
        server.uri()
    ))
}

#[tokio::test]
async fn test_client_sends_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(header("authorization", "Bearer access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestOAuth2Client::new().use_authorization_header_for_get(true);
    let body = client
        .get(&format!("{}{PROFILE_PATH}", server.uri()), "access_token")
        .await
        .unwrap();

    assert_eq!(body, "{}");
}

#[tokio::test]
async fn test_client_sends_query_token_without_header_mode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(query_param("access_token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestOAuth2Client::new();
    let body = client
        .get(&format!("{}{PROFILE_PATH}", server.uri()), "tok")
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_client_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(TestFixtures::yahoo_error_body("Bad token")),
        )
        .mount(&server)
        .await;

    let client = ReqwestOAuth2Client::new().use_authorization_header_for_get(true);
    let result = client
        .get(&format!("{}{PROFILE_PATH}", server.uri()), "expired")
        .await;

    match result {
        Err(TransportError::Status { status_code, data }) => {
            assert_eq!(status_code, 401);
            assert!(data.contains("Bad token"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_strategy_fetches_profile_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(query_param("format", "json"))
        .and(header("authorization", "Bearer access_token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(TestFixtures::yahoo_profile_body()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let strategy = YahooTokenStrategy::with_timeout(
        options_for(&server),
        Some(Duration::from_secs(5)),
        StaticVerifier::accepting(None),
    )
    .unwrap();

    match strategy.authenticate(&TestFixtures::body_request()).await {
        AuthOutcome::Success { user, .. } => {
            assert_eq!(user.display_name, "Andrew Orel");
            assert_eq!(user.primary_email(), "andrew_orel@yahoo.com");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_protected_resource_matches_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("profile"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestOAuth2Client::new().use_authorization_header_for_get(true);
    let body = client
        .get_protected_resource(&format!("{}{PROFILE_PATH}", server.uri()), "tok")
        .await
        .unwrap();

    assert_eq!(body, "profile");
}

#[tokio::test]
async fn test_timeout_is_hard_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(TestFixtures::yahoo_profile_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let strategy = YahooTokenStrategy::with_timeout(
        options_for(&server),
        Some(Duration::from_millis(200)),
        StaticVerifier::accepting(None),
    )
    .unwrap();

    match strategy.authenticate(&TestFixtures::body_request()).await {
        AuthOutcome::Error(StrategyError::Profile(ProfileError::Transport(e))) => {
            assert_eq!(e.message, InternalOAuthError::FETCH_PROFILE_FAILED);
            assert_eq!(e.status_code, None);
            assert!(e.source.is_some());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(strategy.verifier().calls().is_empty());
}

#[tokio::test]
async fn test_strategy_reports_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(TestFixtures::yahoo_error_body(
                "Please provide valid credentials",
            )),
        )
        .mount(&server)
        .await;

    let strategy =
        YahooTokenStrategy::new(options_for(&server), StaticVerifier::accepting(None)).unwrap();

    match strategy.authenticate(&TestFixtures::query_request()).await {
        AuthOutcome::Error(StrategyError::Profile(ProfileError::Transport(e))) => {
            assert_eq!(e.message, "Please provide valid credentials");
            assert_eq!(e.status_code, Some(401));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
    assert!(strategy.verifier().calls().is_empty());
}

#[actix_web::test]
async fn test_endpoint_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(TestFixtures::yahoo_profile_body()),
        )
        .mount(&server)
        .await;

    let strategy = YahooTokenStrategy::new(options_for(&server), ProfileVerifier).unwrap();
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(strategy))
            .route(
                "/auth/yahoo/token",
                web::post().to(token_authenticate::<ProfileVerifier>),
            )
            .route(
                "/auth/yahoo/token",
                web::get().to(token_authenticate::<ProfileVerifier>),
            ),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/auth/yahoo/token")
        .set_json(json!({
            "access_token": "access_token",
            "xoauth_yahoo_guid": "1234"
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["id"], "SCQ4A46XAEDWNYKPZ6PJ4JHC4E");
    assert_eq!(body["user"]["provider"], "yahoo");

    let req = actix_test::TestRequest::get()
        .uri("/auth/yahoo/token?access_token=access_token")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(
        body["error_description"],
        "You should provide access_token and xoauth_yahoo_guid"
    );
}
