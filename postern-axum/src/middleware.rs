use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use postern::Postern;
use postern_core::{RefreshTokenRepository, SessionToken};

use crate::{
    error::{AuthError, Result},
    types::CookieConfig,
};

pub struct AuthState<R: RefreshTokenRepository> {
    pub postern: Arc<Postern<R>>,
}

impl<R: RefreshTokenRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            postern: self.postern.clone(),
        }
    }
}

/// Verify the session cookie, if any, and stash the session in the request
/// extensions for [`AuthSession`](crate::AuthSession) /
/// [`OptionalAuthSession`](crate::OptionalAuthSession) to pick up.
///
/// Requests without a valid session pass through untouched; rejecting them
/// is [`require_auth`]'s job.
pub async fn auth_middleware<R>(
    State(state): State<AuthState<R>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response
where
    R: RefreshTokenRepository,
{
    if let Some(token) = session_token_from_jar(&jar, &request) {
        match state.postern.verify_session(&token) {
            Ok(session) => {
                request.extensions_mut().insert(session);
            }
            Err(err) => {
                tracing::debug!(error = %err, "Invalid session token");
            }
        }
    }

    next.run(request).await
}

/// Reject the request outright unless it carries a verifiable session.
pub async fn require_auth<R>(
    State(state): State<AuthState<R>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response>
where
    R: RefreshTokenRepository,
{
    let token = session_token_from_jar(&jar, &request).ok_or(AuthError::Unauthorized)?;

    state
        .postern
        .verify_session(&token)
        .map_err(|_| AuthError::Unauthorized)?;

    Ok(next.run(request).await)
}

fn session_token_from_jar(jar: &CookieJar, request: &Request) -> Option<SessionToken> {
    let name = request
        .extensions()
        .get::<crate::types::CallbackOptions>()
        .map(|options| options.cookie.name.clone())
        .unwrap_or_else(|| CookieConfig::default().name);

    jar.get(&name).map(|cookie| SessionToken::new(cookie.value()))
}
