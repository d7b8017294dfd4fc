//! Web front end for clubboard.
//!
//! Server-rendered pages behind a cookie session. Every route except the
//! login page, the health check, and static assets requires a signed-in
//! user.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod views;

pub use error::WebError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
