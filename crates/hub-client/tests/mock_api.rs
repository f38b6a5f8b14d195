//! Mock API tests for the hub-client library.
//!
//! These tests use wiremock to simulate the Projects Hub API and exercise
//! the client's behavior without a live backend.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hub_client::{ApiClient, AuthClient, LoginRequest, SignupRequest};
use hub_core::{AccessToken, ApiUrl, Error, MemoryStore, RefreshToken, Session, SessionStore};

/// Helper to create an API client targeting a mock server.
fn mock_api(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiUrl::new(server.uri()).unwrap())
}

/// A token grant body with far-future expiries.
fn grant(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "accessToken": access,
        "refreshToken": refresh,
        "accessTokenExpiresAt": "2030-01-01T00:00:00Z",
        "refreshTokenExpiresAt": "2031-01-01T00:00:00Z"
    })
}

fn login_request() -> LoginRequest {
    LoginRequest {
        email: "a@b.com".into(),
        password: "x".into(),
    }
}

/// Mount a login mock and log a fresh client in.
async fn logged_in_client(
    server: &MockServer,
    grant_body: serde_json::Value,
) -> (AuthClient, Arc<MemoryStore>) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant_body))
        .mount(server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let auth = AuthClient::new(mock_api(server), Arc::clone(&store));
    auth.login(&login_request()).await.unwrap();
    (auth, store)
}

fn api_code(err: &Error) -> &str {
    match err {
        Error::Api(api) => &api.code,
        other => panic!("expected API error, got {other:?}"),
    }
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_success_persists_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "a@b.com",
            "password": "x"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t1", "r1")))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let auth = AuthClient::new(mock_api(&server), Arc::clone(&store));

    let session = auth.login(&login_request()).await.unwrap();

    assert_eq!(session.access_token.as_str(), "t1");
    assert_eq!(session.email.as_deref(), Some("a@b.com"));
    assert!(auth.is_authenticated());

    let persisted = store.load().unwrap();
    assert_eq!(persisted.access_token.as_str(), "t1");
    assert_eq!(persisted.email.as_deref(), Some("a@b.com"));
}

#[tokio::test]
async fn test_login_failure_leaves_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid email or password.",
            "code": "INVALID_CREDENTIALS"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let auth = AuthClient::new(mock_api(&server), Arc::clone(&store));

    let err = auth.login(&login_request()).await.unwrap_err();
    assert_eq!(api_code(&err), "INVALID_CREDENTIALS");
    assert!(!auth.is_authenticated());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_signup_has_no_session_side_effect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "a@b.com",
            "password": "x"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Account created."
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let auth = AuthClient::new(mock_api(&server), Arc::clone(&store));

    let response = auth
        .signup(&SignupRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "a@b.com".into(),
            password: "x".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.message.as_deref(), Some("Account created."));
    assert!(auth.session().is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_signup_failure_surfaces_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Email already registered.",
            "code": "EMAIL_TAKEN"
        })))
        .mount(&server)
        .await;

    let auth = AuthClient::new(mock_api(&server), MemoryStore::new());
    let err = auth
        .signup(&SignupRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "a@b.com".into(),
            password: "x".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(api_code(&err), "EMAIL_TAKEN");
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_rotates_and_persists_session() {
    let server = MockServer::start().await;
    let (auth, store) = logged_in_client(&server, grant("t1", "r1")).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t2", "r2")))
        .mount(&server)
        .await;

    let session = auth.refresh_tokens().await.unwrap();

    assert_eq!(session.access_token.as_str(), "t2");
    // Email survives the rotation; the grant does not echo it.
    assert_eq!(session.email.as_deref(), Some("a@b.com"));
    assert_eq!(store.load().unwrap().access_token.as_str(), "t2");
    assert!(!auth.is_refreshing());
}

#[tokio::test]
async fn test_refresh_without_session_fails_fast() {
    let server = MockServer::start().await;

    let auth = AuthClient::new(mock_api(&server), MemoryStore::new());
    let err = auth.refresh_tokens().await.unwrap_err();

    assert_eq!(api_code(&err), "NO_REFRESH_TOKEN");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_refreshes_coalesce_into_one_exchange() {
    let server = MockServer::start().await;
    let (auth, _store) = logged_in_client(&server, grant("t1", "r1")).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(grant("t2", "r2"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (a, b, c, d, e) = tokio::join!(
        auth.refresh_tokens(),
        auth.refresh_tokens(),
        auth.refresh_tokens(),
        auth.refresh_tokens(),
        auth.refresh_tokens(),
    );

    for outcome in [a, b, c, d, e] {
        assert_eq!(outcome.unwrap().access_token.as_str(), "t2");
    }
}

#[tokio::test]
async fn test_failed_refresh_clears_session_and_propagates() {
    let server = MockServer::start().await;
    let (auth, store) = logged_in_client(&server, grant("t1", "r1")).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "expired",
            "code": "TOKEN_EXPIRED"
        })))
        .mount(&server)
        .await;

    let err = auth.refresh_tokens().await.unwrap_err();

    assert_eq!(err.to_string(), "[TOKEN_EXPIRED] expired");
    assert!(auth.session().is_none());
    assert!(store.load().is_none());
    assert!(!auth.is_refreshing());
}

#[tokio::test]
async fn test_settled_refresh_allows_a_new_exchange() {
    let server = MockServer::start().await;
    let (auth, _store) = logged_in_client(&server, grant("t1", "r1")).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t2", "r2")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t3", "r3")))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        auth.refresh_tokens().await.unwrap().access_token.as_str(),
        "t2"
    );
    assert_eq!(
        auth.refresh_tokens().await.unwrap().access_token.as_str(),
        "t3"
    );
}

// ============================================================================
// Authorized Call Tests
// ============================================================================

#[tokio::test]
async fn test_get_authorized_without_token_makes_no_network_call() {
    let server = MockServer::start().await;

    let auth = AuthClient::new(mock_api(&server), MemoryStore::new());
    let err = auth
        .get_authorized::<serde_json::Value>("/api/test")
        .await
        .unwrap_err();

    assert_eq!(api_code(&err), "UNAUTHORIZED");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_authorized_attaches_bearer_token() {
    let server = MockServer::start().await;
    let (auth, _store) = logged_in_client(&server, grant("t1", "r1")).await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let result: serde_json::Value = auth.get_authorized("/api/test").await.unwrap();
    assert_eq!(result, json!({"ok": true}));
}

#[tokio::test]
async fn test_get_authorized_refreshes_once_and_retries_on_401() {
    let server = MockServer::start().await;
    let (auth, _store) = logged_in_client(&server, grant("t1", "r1")).await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Token expired.",
            "code": "TOKEN_EXPIRED"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t2", "r2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/test"))
        .and(header("authorization", "Bearer t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result: serde_json::Value = auth.get_authorized("/api/test").await.unwrap();
    assert_eq!(result, json!({"ok": true}));
    assert_eq!(auth.session().unwrap().access_token.as_str(), "t2");
}

#[tokio::test]
async fn test_get_authorized_does_not_retry_twice() {
    let server = MockServer::start().await;
    let (auth, _store) = logged_in_client(&server, grant("t1", "r1")).await;

    // Every GET is rejected, even with the fresh token.
    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Token expired.",
            "code": "TOKEN_EXPIRED"
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t2", "r2")))
        .expect(1)
        .mount(&server)
        .await;

    let err = auth
        .get_authorized::<serde_json::Value>("/api/test")
        .await
        .unwrap_err();

    assert_eq!(api_code(&err), "TOKEN_EXPIRED");
    // The refreshed session stays; only refresh failures clear it.
    assert_eq!(auth.session().unwrap().access_token.as_str(), "t2");
}

#[tokio::test]
async fn test_get_authorized_without_refresh_token_surfaces_401() {
    let server = MockServer::start().await;

    // Grant without a refresh token: the 401 cannot be retried.
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "t1",
            "accessTokenExpiresAt": "2030-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Token expired.",
            "code": "TOKEN_EXPIRED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(mock_api(&server), MemoryStore::new());
    auth.login(&login_request()).await.unwrap();

    let err = auth
        .get_authorized::<serde_json::Value>("/api/test")
        .await
        .unwrap_err();
    assert_eq!(api_code(&err), "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_non_401_failures_are_not_retried() {
    let server = MockServer::start().await;
    let (auth, _store) = logged_in_client(&server, grant("t1", "r1")).await;

    // Non-JSON 500: surfaces as the generic HTTP error, no refresh attempt.
    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = auth
        .get_authorized::<serde_json::Value>("/api/test")
        .await
        .unwrap_err();
    assert_eq!(api_code(&err), "HTTP_ERROR");
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_clears_memory_and_store() {
    let server = MockServer::start().await;
    let (auth, store) = logged_in_client(&server, grant("t1", "r1")).await;

    auth.logout();

    assert!(auth.session().is_none());
    assert!(store.load().is_none());

    let err = auth
        .get_authorized::<serde_json::Value>("/api/test")
        .await
        .unwrap_err();
    assert_eq!(api_code(&err), "UNAUTHORIZED");

    // Idempotent.
    auth.logout();
    assert!(auth.session().is_none());
}

// ============================================================================
// Session Restore Tests
// ============================================================================

#[tokio::test]
async fn test_restored_session_is_adopted_from_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store.save(&Session {
        access_token: AccessToken::new("t1"),
        refresh_token: Some(RefreshToken::new("r1")),
        access_token_expires_at: Some("2030-01-01T00:00:00Z".parse().unwrap()),
        refresh_token_expires_at: Some("2031-01-01T00:00:00Z".parse().unwrap()),
        email: Some("a@b.com".to_string()),
    });

    let auth = AuthClient::new(mock_api(&server), Arc::clone(&store));
    assert!(auth.is_authenticated());

    let result: serde_json::Value = auth.get_authorized("/api/test").await.unwrap();
    assert_eq!(result, json!({"ok": true}));
}

// ============================================================================
// Proactive Renewal Tests
// ============================================================================

#[tokio::test]
async fn test_renewal_fires_immediately_when_already_due() {
    let server = MockServer::start().await;

    // Access token already expired: the renewal delay clamps to zero.
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "t1",
            "refreshToken": "r1",
            "accessTokenExpiresAt": "2020-01-01T00:00:00Z",
            "refreshTokenExpiresAt": "2031-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t2", "r2")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(mock_api(&server), MemoryStore::new());
    auth.login(&login_request()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(auth.session().unwrap().access_token.as_str(), "t2");
}

#[tokio::test]
async fn test_renewal_failure_forces_logout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "t1",
            "refreshToken": "r1",
            "accessTokenExpiresAt": "2020-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "expired",
            "code": "TOKEN_EXPIRED"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let auth = AuthClient::new(mock_api(&server), Arc::clone(&store));
    auth.login(&login_request()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(auth.session().is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_renewal_is_canceled_on_logout() {
    let server = MockServer::start().await;

    // Renewal would fire ~200ms after login; logout cancels it first.
    let expires_at = Utc::now() + TimeDelta::milliseconds(30_200);
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "t1",
            "refreshToken": "r1",
            "accessTokenExpiresAt": expires_at.to_rfc3339()
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t2", "r2")))
        .expect(0)
        .mount(&server)
        .await;

    let auth = AuthClient::new(mock_api(&server), MemoryStore::new());
    auth.login(&login_request()).await.unwrap();
    auth.logout();

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(auth.session().is_none());
}

#[tokio::test]
async fn test_no_renewal_without_refresh_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "t1",
            "accessTokenExpiresAt": "2020-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("t2", "r2")))
        .expect(0)
        .mount(&server)
        .await;

    let auth = AuthClient::new(mock_api(&server), MemoryStore::new());
    auth.login(&login_request()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    // Session stays as logged in; nothing could renew it.
    assert_eq!(auth.session().unwrap().access_token.as_str(), "t1");
}

// ============================================================================
// Response Handling Tests
// ============================================================================

#[tokio::test]
async fn test_non_json_success_body_is_treated_as_absent() {
    let server = MockServer::start().await;
    let (auth, _store) = logged_in_client(&server, grant("t1", "r1")).await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let result: serde_json::Value = auth.get_authorized("/api/test").await.unwrap();
    assert_eq!(result, serde_json::Value::Null);
}

#[tokio::test]
async fn test_unauthenticated_get_sends_no_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations/member-invitations/preview"))
        .and(query_param("token", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizationName": "Acme"
        })))
        .mount(&server)
        .await;

    let api = mock_api(&server);
    let preview = hub_client::preview_invitation(&api, "abc").await.unwrap();
    assert_eq!(preview.organization_name.as_deref(), Some("Acme"));

    let requests = server.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .all(|request| !request.headers.contains_key("authorization"))
    );
}
