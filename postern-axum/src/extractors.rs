use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::CookieJar;
use postern_core::{Session, SessionToken};

use crate::{error::AuthError, types::CookieConfig};

/// The verified session for the current request.
///
/// Populated by [`auth_middleware`](crate::auth_middleware); rejects with
/// 401 when the request carries no valid session.
pub struct AuthSession(pub Session);

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthSession)
            .ok_or(AuthError::Unauthorized)
    }
}

/// Like [`AuthSession`], but anonymous requests pass through as `None`.
pub struct OptionalAuthSession(pub Option<Session>);

impl<S> FromRequestParts<S> for OptionalAuthSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().cloned();

        Ok(OptionalAuthSession(session))
    }
}

/// The raw, unverified session token from the session cookie, if present.
pub struct SessionTokenFromCookie(pub Option<SessionToken>);

impl<S> FromRequestParts<S> for SessionTokenFromCookie
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .extensions
            .get::<crate::types::CallbackOptions>()
            .map(|options| options.cookie.name.clone())
            .unwrap_or_else(|| CookieConfig::default().name);

        let jar = parts
            .extract::<CookieJar>()
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid cookie header"))?;

        let session_token = jar
            .get(&name)
            .map(|cookie| SessionToken::new(cookie.value()));

        Ok(SessionTokenFromCookie(session_token))
    }
}
