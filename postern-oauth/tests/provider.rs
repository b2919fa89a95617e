use std::time::Duration;

use postern_core::{Error, error::ProviderError};
use postern_oauth::Provider;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

const CLIENT_ID: &str = "test_client_id";
const CLIENT_SECRET: &str = "test_client_secret";
const REDIRECT_URI: &str = "http://localhost/callback";

fn provider_for(server: &MockServer) -> Provider {
    Provider::builder("unidays")
        .base_url(server.uri())
        .client_id(CLIENT_ID)
        .client_secret(CLIENT_SECRET)
        .redirect_uri(REDIRECT_URI)
        .build()
        .unwrap()
}

#[tokio::test]
async fn exchange_code_posts_the_expected_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=CODE1"))
        .and(body_string_contains(format!("client_id={CLIENT_ID}")))
        .and(body_string_contains(format!("client_secret={CLIENT_SECRET}")))
        .and(body_string_contains("redirect_uri=http%3A%2F%2Flocalhost%2Fcallback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T",
            "refresh_token": "R",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let exchange = provider.exchange_code("CODE1").await.unwrap();

    assert_eq!(exchange.access_token, "T");
    assert_eq!(exchange.refresh_token, "R");
}

#[tokio::test]
async fn exchange_code_surfaces_provider_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.exchange_code("REPLAYED").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Provider(ProviderError::ExchangeFailed {
            status: 400,
            ..
        })
    ));
}

#[tokio::test]
async fn exchange_code_rejects_body_without_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.exchange_code("CODE1").await.unwrap_err();

    assert!(err.is_malformed_response());
}

#[tokio::test]
async fn exchange_code_times_out_on_a_hung_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "T", "refresh_token": "R"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let provider = Provider::builder("unidays")
        .base_url(server.uri())
        .client_id(CLIENT_ID)
        .client_secret(CLIENT_SECRET)
        .redirect_uri(REDIRECT_URI)
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = provider.exchange_code("CODE1").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Provider(ProviderError::Communication { .. })
    ));
}

#[tokio::test]
async fn user_info_sends_the_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oauth/userinfo"))
        .and(header("Authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "u1",
            "given_name": "A",
            "family_name": "B",
            "email": "a@b.com",
            "verification_status": {"user_type": "student", "verified": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let profile = provider.get_user_info("T").await.unwrap();

    assert_eq!(profile.subject.as_str(), "u1");
    assert_eq!(profile.email.as_deref(), Some("a@b.com"));
    assert_eq!(profile.user_type(), Some("student"));
    assert!(profile.is_verified());
}

#[tokio::test]
async fn user_info_rejects_response_without_sub() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oauth/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "a@b.com"
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.get_user_info("T").await.unwrap_err();

    assert!(err.is_malformed_response());
}

#[tokio::test]
async fn user_info_surfaces_rejected_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oauth/userinfo"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.get_user_info("expired").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Provider(ProviderError::ExchangeFailed {
            status: 401,
            ..
        })
    ));
}
