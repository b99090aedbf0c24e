//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use formpulse_core::{AccountService, ResponseService, SurveyService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Account and session operations.
    pub account_service: AccountService,
    /// Survey authoring and lookup.
    pub survey_service: SurveyService,
    /// Response submission, listing, analytics, export.
    pub response_service: ResponseService,
}

/// Authentication middleware.
///
/// Resolves the bearer token against the backend auth service on every
/// request; nothing is cached. A token that fails to resolve leaves the
/// request anonymous rather than rejecting it. Endpoints that require
/// an account enforce that via the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.account_service.current(token).await {
            Ok(account) => {
                req.extensions_mut().insert(account);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Session token did not resolve, continuing anonymously");
            }
        }
    }

    next.run(req).await
}
