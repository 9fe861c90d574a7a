use std::sync::Arc;

use auth::AuthenticationService;
use auth::SigningSecret;
use auth::TokenIssuer;
use auth_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task with the admin user registered
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authentication_service = AuthenticationService::new(SigningSecret::new(TEST_SECRET));
        authentication_service
            .add_user(ADMIN_USERNAME, ADMIN_PASSWORD, "admin")
            .expect("Failed to register admin user");

        let router = create_router(Arc::new(authentication_service));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(SigningSecret::new(TEST_SECRET)),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Log in as the admin user and return the issued token
    pub async fn login_admin(&self) -> String {
        let response = self
            .post("/authenticate")
            .json(&serde_json::json!({
                "username": ADMIN_USERNAME,
                "password": ADMIN_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }
}
