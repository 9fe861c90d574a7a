mod common;

use auth::Claims;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use common::TestApp;
use common::ADMIN_PASSWORD;
use common::ADMIN_USERNAME;
use reqwest::StatusCode;
use serde_json::json;

fn unauthorized_body(message: &str) -> serde_json::Value {
    json!({"error": {"code": "401", "message": message}})
}

#[tokio::test]
async fn test_authenticate_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/authenticate")
        .json(&json!({
            "username": ADMIN_USERNAME,
            "password": ADMIN_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("Missing token");
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/authenticate")
        .json(&json!({
            "username": ADMIN_USERNAME,
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, unauthorized_body("invalid username or password"));
}

#[tokio::test]
async fn test_authenticate_nonexistent_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/authenticate")
        .json(&json!({
            "username": "ghost",
            "password": ADMIN_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, unauthorized_body("invalid username or password"));
}

#[tokio::test]
async fn test_authenticate_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/authenticate")
        .header("content-type", "application/json")
        .body("{\"username\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "400");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_protected_route_returns_claims() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let response = app
        .get("/test")
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let claims: Claims = response.json().await.expect("Failed to parse response");
    assert_eq!(claims.username, "admin");
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn test_protected_route_missing_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/test")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, unauthorized_body("authorization header missing"));
}

#[tokio::test]
async fn test_protected_route_wrong_scheme() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/test")
        .header("Authorization", "Token xyz")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, unauthorized_body("authorization header invalid"));
}

#[tokio::test]
async fn test_protected_route_tampered_signature() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let (unsigned, signature) = token.rsplit_once('.').expect("Missing signature");
    let replacement = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}.{}{}", unsigned, replacement, &signature[1..]);

    let response = app
        .get("/test")
        .header("Authorization", format!("Bearer {}", tampered))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, unauthorized_body("signature is invalid"));
}

#[tokio::test]
async fn test_protected_route_expired_token() {
    let app = TestApp::spawn().await;

    let now = chrono::Utc::now().timestamp();
    let claims = Claims::new("admin", "admin")
        .with_issued_at(now - 7200)
        .with_expiration(now - 3600);
    let token = app
        .token_issuer
        .sign(&claims)
        .expect("Failed to sign token");

    let response = app
        .get("/test")
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, unauthorized_body("token is expired"));
}

#[tokio::test]
async fn test_protected_route_rejects_unsigned_token() {
    let app = TestApp::spawn().await;

    let header = URL_SAFE_NO_PAD.encode(json!({"alg": "none", "typ": "JWT"}).to_string());
    let payload = URL_SAFE_NO_PAD.encode(json!({"username": "admin", "role": "admin"}).to_string());

    let response = app
        .get("/test")
        .header("Authorization", format!("Bearer {}.{}.", header, payload))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, unauthorized_body("signing method none is not valid"));
}
