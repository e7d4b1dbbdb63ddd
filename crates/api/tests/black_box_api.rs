use chrono::{Duration as ChronoDuration, Utc};

use agendum_auth::JwtClaims;
use agendum_core::UserId;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = agendum_api::app::build_app(jwt_secret.to_string()).await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(jwt_secret: &str, user_id: UserId) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn event_body(hours_from_now: i64) -> serde_json::Value {
    json!({
        "title": "Rooftop meetup",
        "location": "Downtown",
        "time": (Utc::now() + ChronoDuration::hours(hours_from_now)).to_rfc3339(),
    })
}

#[tokio::test]
async fn auth_required_for_event_endpoints() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/events", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Health stays open.
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn whoami_echoes_the_token_subject() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let user_id = UserId::new();
    let token = mint_jwt(jwt_secret, user_id);

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user_id"].as_str().unwrap(), user_id.to_string());
}

#[tokio::test]
async fn event_lifecycle_over_http() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let owner_token = mint_jwt(jwt_secret, UserId::new());
    let client = reqwest::Client::new();

    // Create.
    let res = client
        .post(format!("{}/events", srv.base_url))
        .bearer_auth(&owner_token)
        .json(&event_body(1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    // Same owner, same instant: rejected as a duplicate.
    let res = client
        .post(format!("{}/events", srv.base_url))
        .bearer_auth(&owner_token)
        .json(&json!({
            "title": "Second booking",
            "location": "Elsewhere",
            "time": created["time"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_time");

    // Move the event.
    let res = client
        .put(format!("{}/events/{}", srv.base_url, id))
        .bearer_auth(&owner_token)
        .json(&event_body(2))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // A different user cannot touch it.
    let stranger_token = mint_jwt(jwt_secret, UserId::new());
    let res = client
        .put(format!("{}/events/{}", srv.base_url, id))
        .bearer_auth(&stranger_token)
        .json(&event_body(3))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_owner");

    // Listing shows it to the owner only.
    let res = client
        .get(format!("{}/events", srv.base_url))
        .bearer_auth(&owner_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["total"], 1);

    let res = client
        .get(format!("{}/events", srv.base_url))
        .bearer_auth(&stranger_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["total"], 0);

    // Share dispatches and returns the event.
    let res = client
        .post(format!("{}/events/{}/share", srv.base_url, id))
        .bearer_auth(&owner_token)
        .json(&json!({"email": "friend@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"].as_str().unwrap(), id);

    // Delete, then the record is gone.
    let res = client
        .delete(format!("{}/events/{}", srv.base_url, id))
        .bearer_auth(&owner_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/events/{}", srv.base_url, id))
        .bearer_auth(&owner_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_past_times_and_blank_fields() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, UserId::new());
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/events", srv.base_url))
        .bearer_auth(&token)
        .json(&event_body(-1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "past_time");

    let res = client
        .post(format!("{}/events", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "  ",
            "location": "Downtown",
            "time": (Utc::now() + ChronoDuration::hours(1)).to_rfc3339(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn rejects_malformed_ids_and_emails() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let token = mint_jwt(jwt_secret, UserId::new());
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/events/not-a-uuid", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");

    // Create something shareable, then feed it a bad address.
    let res = client
        .post(format!("{}/events", srv.base_url))
        .bearer_auth(&token)
        .json(&event_body(1))
        .send()
        .await
        .unwrap();
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/events/{}/share", srv.base_url, id))
        .bearer_auth(&token)
        .json(&json!({"email": "not-an-address"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}
