//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use formpulse_store::Account;

/// Authenticated account extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Account);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by the auth middleware when the session token resolves.
        parts
            .extensions
            .get::<Account>()
            .cloned()
            .map(AuthUser)
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

/// Optional authenticated account extractor.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Account>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Account>().cloned()))
    }
}

/// Raw session token from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|token| Self(token.to_string()))
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}
