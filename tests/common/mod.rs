//! Test helpers for the web integration tests.
//!
//! Builds the full router over an in-memory database, seeded with the
//! default administrator, and wraps it in an `axum_test::TestServer` that
//! keeps cookies between requests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::connect_info::MockConnectInfo;
use axum_test::{TestResponse, TestServer, TestServerConfig};

use clubboard::web::handlers::AppState;
use clubboard::web::router::create_router;
use clubboard::{ensure_admin, register, Database, RegistrationRequest, User};

/// Session secret used by every test server.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Seeded administrator.
pub const ADMIN_USERNAME: &str = "teacher";
pub const ADMIN_PASSWORD: &str = "9999";

/// Address every request appears to come from.
pub fn client_addr() -> SocketAddr {
    SocketAddr::from(([203, 0, 113, 5], 40000))
}

/// A running test application.
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<Database>,
}

/// Create a test app with default settings.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|state| state).await
}

/// Create a test app, letting the caller adjust the state.
///
/// The login rate limit defaults to a high value so tests that log in
/// repeatedly are not throttled.
pub async fn spawn_app_with(configure: impl FnOnce(AppState) -> AppState) -> TestApp {
    spawn_app_serving(None, configure).await
}

/// Create a test app that serves `static_path` under `/static`.
pub async fn spawn_app_serving(
    static_path: Option<&str>,
    configure: impl FnOnce(AppState) -> AppState,
) -> TestApp {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );
    ensure_admin(db.pool(), ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("Failed to seed admin");

    let state = configure(
        AppState::new(db.clone(), TEST_SECRET, 3600)
            .with_locale("en")
            .with_login_rate_limit(100),
    );
    let router = create_router(Arc::new(state), static_path).layer(MockConnectInfo(client_addr()));

    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    let server = TestServer::new_with_config(router, config).expect("Failed to create test server");

    TestApp { server, db }
}

/// Insert a non-admin user directly.
pub async fn create_user(db: &Database, username: &str, pin: &str) -> User {
    register(db.pool(), &RegistrationRequest::new(username, pin))
        .await
        .expect("Failed to create test user")
}

/// Submit the login form.
pub async fn login(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .await
}

/// Submit the login form and assert it succeeded.
pub async fn login_ok(server: &TestServer, username: &str, password: &str) {
    let response = login(server, username, password).await;
    assert_redirect(&response, "/");
}

/// Assert a `303 See Other` redirect to `location`.
pub fn assert_redirect(response: &TestResponse, location: &str) {
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), location);
}
