//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::{get, post}};
use formpulse_common::AppResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    extractors::{AuthUser, SessionToken},
    middleware::AppState,
    response::ApiResponse,
};

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Account payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
}

/// Create a new account.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    req.validate()?;

    let account = state.account_service.signup(&req.email, &req.password).await?;

    Ok(ApiResponse::ok(AccountResponse {
        id: account.id,
        email: account.email,
    }))
}

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub token: String,
}

/// Create a session for an existing account.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let session = state.account_service.login(&req.email, &req.password).await?;

    Ok(ApiResponse::ok(LoginResponse {
        user_id: session.user_id,
        token: session.secret,
    }))
}

/// Logout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub ok: bool,
}

/// Delete the current session.
async fn logout(
    SessionToken(token): SessionToken,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<LogoutResponse>> {
    state.account_service.logout(&token).await?;

    Ok(ApiResponse::ok(LogoutResponse { ok: true }))
}

/// Return the account behind the current session.
async fn me(AuthUser(account): AuthUser) -> ApiResponse<AccountResponse> {
    ApiResponse::ok(AccountResponse {
        id: account.id,
        email: account.email,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
