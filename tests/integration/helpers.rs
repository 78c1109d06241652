//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use alerthub_api::{AppState, build_app};
use alerthub_auth::JwtEncoder;
use alerthub_core::config::{AppConfig, StoreBackend};
use alerthub_database::Stores;

const TEST_SECRET: &str = "integration-test-secret-0123456789";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handles for direct setup
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application after adjusting the default config
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.auth.jwt_secret = TEST_SECRET.to_string();
        adjust(&mut config);

        let stores = Stores::memory();
        let encoder = JwtEncoder::new(&config.auth);
        let router = build_app(AppState::new(config.clone(), &stores));

        Self {
            router,
            stores,
            config,
            encoder,
        }
    }

    /// Sign a token for a member with the given email
    pub fn member_token(&self, user_id: Uuid, email: &str) -> String {
        self.token(user_id, Some(email), Some("authenticated"))
    }

    /// Sign a token carrying the admin role
    pub fn admin_token(&self) -> String {
        self.token(Uuid::new_v4(), Some("admin@example.com"), Some("admin"))
    }

    /// Sign an arbitrary token
    pub fn token(&self, user_id: Uuid, email: Option<&str>, role: Option<&str>) -> String {
        self.encoder
            .issue(user_id, email, role, chrono::Duration::minutes(10))
            .expect("Failed to sign token")
    }

    /// Create an alert through the admin API and return its id
    pub async fn create_alert(&self, body: Value) -> Uuid {
        let token = self.admin_token();
        let response = self
            .request("POST", "/api/admin/alerts", Some(body), Some(&token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("No id in create response")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Titles of the alerts in a list response, in order
    pub fn titles(&self) -> Vec<String> {
        self.body["data"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|a| a["title"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
