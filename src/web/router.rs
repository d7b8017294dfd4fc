//! Router configuration for the web front end.

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{
    admin, feed, login, login_form, logout, post_message, register, register_form, AppState,
};
use super::middleware::{login_rate_limit, require_login, security_headers};

/// Create the application router.
///
/// When `static_path` is given, files under it are served at `/static`.
/// Every route, the static files, and the fallback sit behind the login
/// gate.
pub fn create_router(app_state: Arc<AppState>, static_path: Option<&str>) -> Router {
    let login_routes = get(login_form)
        .post(login)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            login_rate_limit,
        ));

    let mut router = Router::new()
        .route("/", get(feed).post(post_message))
        .route("/login", login_routes)
        .route("/logout", get(logout))
        .route("/register", get(register_form).post(register))
        .route("/admin", get(admin))
        .route("/health", get(health_check));

    if let Some(path) = static_path {
        router = router.nest_service("/static", ServeDir::new(path));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    require_login,
                )),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
