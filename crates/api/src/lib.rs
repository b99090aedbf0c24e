//! HTTP API for formpulse.
//!
//! Routes (mounted under `/api` by the server):
//!
//! - `/auth`: signup, login, logout, current account
//! - `/surveys`: create, owner listing, public fetch
//! - `/surveys/{id}/responses`: submission and raw listing
//! - `/surveys/{id}/analytics`: aggregated report
//! - `/surveys/{id}/export`: CSV download

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

use axum::Router;
use middleware::AppState;

pub use extractors::{AuthUser, MaybeAuthUser, SessionToken};
pub use response::{ApiError, ApiResponse};

/// Build the API router.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", endpoints::auth::router())
        .nest(
            "/surveys",
            endpoints::surveys::router().merge(endpoints::responses::router()),
        )
}
