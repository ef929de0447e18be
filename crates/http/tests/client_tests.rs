//! Integration tests for the Picloop HTTP client

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use picloop_http::client::{ApiClient, ClientError};
use picloop_http::session::{MemorySessionStore, Session, SessionStore};
use picloop_http::PublicClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_with(access: &str, refresh: Option<&str>) -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_session(Session {
        access_token: Some(access.to_string()),
        refresh_token: refresh.map(str::to_string),
        user: None,
    }))
}

fn client_for(server: &MockServer, store: Arc<MemorySessionStore>) -> ApiClient {
    ApiClient::builder()
        .base_url(server.uri())
        .session(store)
        .build()
        .unwrap()
}

fn images_body() -> serde_json::Value {
    json!({
        "images": [{
            "id": 7,
            "key": "uploads/7.png",
            "filename": "7.png",
            "size": 1024,
            "url": "https://cdn.example.com/uploads/7.png?sig=abc",
            "created_at": "2024-05-01T10:00:00Z"
        }],
        "count": 1
    })
}

#[tokio::test]
async fn builder_requires_base_url_and_session() {
    let result = ApiClient::builder()
        .session(Arc::new(MemorySessionStore::new()))
        .build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));

    let result = ApiClient::builder().base_url("http://localhost:8080").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn bearer_token_attached_to_profile_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": 1,
            "email": "a@b.com",
            "name": "A"
        })))
        .mount(&mock_server)
        .await;

    let store = store_with("abc", Some("xyz"));
    let client = client_for(&mock_server, store);

    let profile = client.me().await.unwrap();
    assert_eq!(profile.user_id, 1);
    assert_eq!(profile.email, "a@b.com");
}

#[tokio::test]
async fn image_listing_sends_pagination_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "50"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(images_body()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, store_with("abc", None));

    let listing = client.list_images(10, 50).await.unwrap();
    assert_eq!(listing.count, 1);
    assert_eq!(listing.images[0].filename, "7.png");
    assert_eq!(listing.images[0].size, 1024);
}

#[tokio::test]
async fn public_image_listing_uses_public_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/public"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(images_body()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, store_with("abc", None));

    let listing = client.list_public_images(0, 50).await.unwrap();
    assert_eq!(listing.count, 1);
    assert_eq!(listing.images[0].key, "uploads/7.png");
}

#[tokio::test]
async fn refresh_not_attempted_without_refresh_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&mock_server)
        .await;

    // The refresh endpoint must never be contacted.
    Mock::given(method("POST"))
        .and(path("/auth/oauth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "nope"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = store_with("expired", None);
    let expired = Arc::new(AtomicBool::new(false));
    let expired_flag = expired.clone();
    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .session(store.clone())
        .on_session_expired(Arc::new(move || {
            expired_flag.store(true, Ordering::SeqCst);
        }))
        .build()
        .unwrap();

    let result = client.list_images(0, 50).await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert!(expired.load(Ordering::SeqCst));
    assert_eq!(store.session(), Session::default());
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/refresh"))
        .and(body_json(json!({"refresh_token": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "new"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/images"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(images_body()))
        .mount(&mock_server)
        .await;

    let store = store_with("expired", Some("r1"));
    let client = client_for(&mock_server, store.clone());

    let listing = client.list_images(0, 50).await.unwrap();
    assert_eq!(listing.count, 1);

    // Access token rotated, refresh token untouched.
    let session = store.session();
    assert_eq!(session.access_token.as_deref(), Some("new"));
    assert_eq!(session.refresh_token.as_deref(), Some("r1"));
}

#[tokio::test]
async fn failed_refresh_logs_out_and_fires_expiry_hook() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_string("refresh token expired"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = store_with("expired", Some("stale"));
    let expired = Arc::new(AtomicBool::new(false));
    let expired_flag = expired.clone();
    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .session(store.clone())
        .on_session_expired(Arc::new(move || {
            expired_flag.store(true, Ordering::SeqCst);
        }))
        .build()
        .unwrap();

    let result = client.list_images(0, 50).await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert!(expired.load(Ordering::SeqCst));
    assert_eq!(store.session(), Session::default());
}

#[tokio::test]
async fn rejected_retry_propagates_without_second_refresh() {
    let mock_server = MockServer::start().await;

    // Both the original request and the retry are rejected.
    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(401).set_body_string("still no"))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "new"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = store_with("expired", Some("r1"));
    let client = client_for(&mock_server, store.clone());

    let result = client.list_images(0, 50).await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));

    // The refresh itself succeeded, so the session survives with the new
    // token; only the request's failure propagates.
    assert_eq!(store.session().access_token.as_deref(), Some("new"));
}

#[tokio::test]
async fn concurrent_401s_share_a_single_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/refresh"))
        .and(body_json(json!({"refresh_token": "r1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "new"}))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/images"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(images_body()))
        .mount(&mock_server)
        .await;

    let store = store_with("expired", Some("r1"));
    let client = client_for(&mock_server, store.clone());

    let results = futures::future::join_all(
        (0..5).map(|_| {
            let client = client.clone();
            async move { client.list_images(0, 50).await }
        }),
    )
    .await;

    for result in results {
        assert_eq!(result.unwrap().count, 1);
    }
    assert_eq!(store.session().access_token.as_deref(), Some("new"));
}

#[tokio::test]
async fn test_token_issuance_returns_full_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/test-token"))
        .and(body_json(json!({"email": "test@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t1",
            "refresh_token": "r1",
            "user": {"user_id": 2, "email": "test@example.com", "name": "Test User"}
        })))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let issued = client.test_token("test@example.com").await.unwrap();

    // One response populates the whole session, no separate profile fetch.
    let store = MemorySessionStore::new();
    store.set_access_token(Some(issued.access_token));
    store.set_refresh_token(issued.refresh_token);
    store.set_user(Some(issued.user));

    let session = store.session();
    assert!(session.is_authenticated());
    assert_eq!(session.access_token.as_deref(), Some("t1"));
    assert_eq!(session.refresh_token.as_deref(), Some("r1"));
    assert_eq!(session.user.unwrap().user_id, 2);
}

#[tokio::test]
async fn refresh_endpoint_exchange() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/refresh"))
        .and(body_json(json!({"refresh_token": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "new"})))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let response = client.refresh("r1").await.unwrap();
    assert_eq!(response.access_token, "new");
}

#[test]
fn google_login_url_targets_oauth_route() {
    let client = PublicClient::new("http://localhost:8001/").unwrap();
    assert_eq!(
        client.google_login_url(),
        "http://localhost:8001/auth/oauth/google"
    );
}
