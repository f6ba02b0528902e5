//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use workforce_api::AppState;
use workforce_auth::password::PasswordHasher;
use workforce_core::config::{AppConfig, Argon2Config, DatabaseProvider};
use workforce_database::repositories::AccountRepository;
use workforce_database::{MemoryStore, Repositories};
use workforce_entity::account::{CreateAccount, Role};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "Gx7#pLq2!vR9zW";
pub const JWT_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Shared state, for direct repository access
    pub state: AppState,
}

/// Status and parsed JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The stable `error` code of a failure envelope.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.provider = DatabaseProvider::Memory;
    config.auth.jwt_secret = JWT_SECRET.to_string();
    config.auth.argon2 = Argon2Config {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    config
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub async fn new() -> Self {
        let config = test_config();
        let repos = Repositories::memory(Arc::new(MemoryStore::new()));
        let state = AppState::new(config, repos).expect("Failed to build state");
        let router = workforce_api::build_app(state.clone());

        let app = Self { router, state };
        app.create_account(ADMIN_EMAIL, "Admin", Role::Admin).await;
        app
    }

    /// Insert an account with [`PASSWORD`] directly into the store
    pub async fn create_account(&self, email: &str, name: &str, role: Role) {
        let hasher = PasswordHasher::new(&self.state.config.auth.argon2).unwrap();
        self.state
            .repos
            .accounts
            .create(&CreateAccount {
                email: email.to_string(),
                password_hash: hasher.hash(PASSWORD).await.unwrap(),
                name: name.to_string(),
                role,
                profile_image: None,
            })
            .await
            .expect("Failed to create account");
    }

    /// Login and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body["data"]["accessToken"]
            .as_str()
            .expect("No accessToken in login response")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, PASSWORD).await
    }

    /// Create a department and return its id
    pub async fn create_department(&self, token: &str, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/department",
                Some(json!({ "name": name })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Onboard an employee and return the employee view
    pub async fn create_employee(
        &self,
        token: &str,
        code: &str,
        name: &str,
        email: &str,
        department_id: Option<&str>,
    ) -> Value {
        let response = self
            .request(
                "POST",
                "/api/employee",
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": PASSWORD,
                    "role": "employee",
                    "employeeCode": code,
                    "designation": "Engineer",
                    "departmentId": department_id,
                    "salary": 5000.0,
                })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }

    /// File a leave request as the token's owner
    pub async fn file_leave(
        &self,
        token: &str,
        leave_type: &str,
        start: &str,
        end: &str,
    ) -> TestResponse {
        self.request(
            "POST",
            "/api/leave/add",
            Some(json!({
                "leaveType": leave_type,
                "startDate": start,
                "endDate": end,
                "reason": "trip",
            })),
            Some(token),
        )
        .await
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
        self.raw_request(method, path, body_str, token).await
    }

    /// Make a request with an arbitrary body string
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
