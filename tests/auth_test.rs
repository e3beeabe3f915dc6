mod common;

use common::{MockTransport, credential, form_value};
use serde_json::json;
use spotufy::{
    config::Config,
    error::Error,
    spotify::{
        auth::{AuthState, TokenManager},
        transport::{Method, classify_status},
    },
    types::{Credential, RedirectInstruction, Scope},
};

const TOKEN_URL: &str = "https://accounts.test/api/token";

fn config() -> Config {
    Config {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        token_url: TOKEN_URL.to_string(),
        auth_url: "https://accounts.test/authorize".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_acquire_app_token() {
    let transport = MockTransport::new().json(
        "/api/token",
        json!({ "access_token": "abc", "token_type": "Bearer", "expires_in": 3600 }),
    );
    let tokens = TokenManager::new(transport.clone(), config());

    let credential = tokens.acquire_app_token().await.unwrap();

    assert_eq!(credential.access_token, "abc");
    assert!(!credential.is_expired());
    assert!(credential.scope.is_empty());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, TOKEN_URL);
    assert_eq!(
        form_value(&requests[0], "grant_type").as_deref(),
        Some("client_credentials")
    );
    assert_eq!(form_value(&requests[0], "client_id").as_deref(), Some("id"));
    assert_eq!(
        form_value(&requests[0], "client_secret").as_deref(),
        Some("secret")
    );
}

#[tokio::test]
async fn test_acquire_app_token_without_secrets_sends_nothing() {
    let transport = MockTransport::new().json("/api/token", json!({ "access_token": "abc" }));
    let tokens = TokenManager::new(
        transport.clone(),
        Config {
            client_secret: String::new(),
            ..config()
        },
    );

    let err = tokens.acquire_app_token().await.unwrap_err();

    assert!(matches!(err, Error::ConfigMissing(ref key) if key == "SPOTIFY_API_AUTH_CLIENT_SECRET"));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_token_response_without_access_token_is_rejected() {
    let transport = MockTransport::new().json("/api/token", json!({ "token_type": "Bearer" }));
    let tokens = TokenManager::new(transport, config());

    let err = tokens.acquire_app_token().await.unwrap_err();

    assert!(matches!(err, Error::AuthRejected(_)));
}

#[tokio::test]
async fn test_malformed_token_response_keeps_decode_error() {
    let transport = MockTransport::new().json(
        "/api/token",
        json!({ "access_token": "abc", "expires_in": "3600" }),
    );
    let tokens = TokenManager::new(transport, config());

    let err = tokens.acquire_app_token().await.unwrap_err();

    let message = match err {
        Error::AuthRejected(message) => message,
        other => panic!("expected a rejection, got {other:?}"),
    };
    assert!(message.contains("malformed token response"), "{message}");
    assert!(!message.contains("no access token"));
}

#[tokio::test]
async fn test_token_endpoint_error_is_rejected() {
    let transport = MockTransport::new().status("/api/token", 400);
    let tokens = TokenManager::new(transport, config());

    let err = tokens.complete_user_authorization("bad-code").await.unwrap_err();

    assert!(matches!(err, Error::AuthRejected(_)));
}

#[tokio::test]
async fn test_complete_user_authorization() {
    let transport = MockTransport::new().json(
        "/api/token",
        json!({
            "access_token": "user-token",
            "expires_in": 3600,
            "scope": "user-top-read playlist-modify-public some-other-scope"
        }),
    );
    let tokens = TokenManager::new(transport.clone(), config());

    let credential = tokens.complete_user_authorization("the-code").await.unwrap();

    assert_eq!(credential.access_token, "user-token");
    assert!(credential.has_scope(Scope::UserTopRead));
    assert!(credential.can_modify_playlists());
    assert!(!credential.has_scope(Scope::PlaylistModifyPrivate));

    let requests = transport.requests();
    // base64("id:secret")
    assert_eq!(
        requests[0].header_value("Authorization"),
        Some("Basic aWQ6c2VjcmV0")
    );
    assert_eq!(
        form_value(&requests[0], "grant_type").as_deref(),
        Some("authorization_code")
    );
    assert_eq!(form_value(&requests[0], "code").as_deref(), Some("the-code"));
    assert_eq!(
        form_value(&requests[0], "redirect_uri").as_deref(),
        Some("http://127.0.0.1:9191/callback")
    );
}

#[tokio::test]
async fn test_complete_user_authorization_empty_code() {
    let transport = MockTransport::new();
    let tokens = TokenManager::new(transport.clone(), config());

    let err = tokens.complete_user_authorization("").await.unwrap_err();

    assert!(matches!(err, Error::AuthRejected(_)));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_begin_user_authorization() {
    let transport = MockTransport::new();
    let tokens = TokenManager::new(transport.clone(), config());

    let instruction = tokens.begin_user_authorization().unwrap();

    assert!(instruction.url.starts_with("https://accounts.test/authorize?"));
    assert!(instruction.url.contains("response_type=code"));
    assert!(instruction.url.contains("client_id=id"));
    assert!(instruction.url.contains(
        "scope=playlist-modify-public%20playlist-modify-private%20user-top-read"
    ));
    assert!(
        instruction
            .url
            .contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A9191%2Fcallback")
    );
    assert!(instruction.url.contains(&format!("state={}", instruction.state)));
    assert!(instruction.url.contains("show_dialog=true"));
    assert_eq!(instruction.state.len(), 32);

    // a fresh state every time
    let again = tokens.begin_user_authorization().unwrap();
    assert_ne!(instruction.state, again.state);

    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_begin_user_authorization_without_client_id() {
    let tokens = TokenManager::new(
        MockTransport::new(),
        Config {
            client_id: String::new(),
            ..config()
        },
    );

    let err = tokens.begin_user_authorization().unwrap_err();
    assert!(matches!(err, Error::ConfigMissing(_)));
}

#[test]
fn test_auth_state_transitions() {
    let mut state = AuthState::default();
    assert_eq!(state, AuthState::Unauthenticated);
    assert!(!state.awaits("abc"));

    state.request(&RedirectInstruction {
        url: "https://accounts.test/authorize".to_string(),
        state: "abc".to_string(),
    });
    assert!(state.awaits("abc"));
    assert!(!state.awaits("other"));
    assert!(state.credential().is_none());

    state.complete(credential(&[Scope::UserTopRead]));
    assert_eq!(state.credential().unwrap().access_token, "test-token");
    assert!(!state.awaits("abc"));

    state.expire();
    assert_eq!(state, AuthState::Expired);

    state.logout();
    assert_eq!(state, AuthState::Unauthenticated);

    // only an authenticated session can expire
    state.expire();
    assert_eq!(state, AuthState::Unauthenticated);
}

#[test]
fn test_credential_expiry() {
    let fresh = Credential::new("token", Default::default(), 3600);
    assert!(!fresh.is_expired());

    let stale = Credential::new("token", Default::default(), -1);
    assert!(stale.is_expired());
}

#[test]
fn test_classify_status() {
    assert!(matches!(classify_status(401, ""), Error::Unauthorized(_)));
    assert!(matches!(classify_status(403, ""), Error::Unauthorized(_)));

    let err = classify_status(503, "unavailable");
    assert_eq!(err.status(), Some(503));
    assert!(err.is_not_found_like());
}
