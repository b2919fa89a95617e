use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use postern::Postern;
use postern_core::RefreshTokenRepository;

use crate::{
    error::AuthError,
    middleware::AuthState,
    types::{CallbackOptions, CallbackQuery, CookieSameSite, STATE_COOKIE},
};

pub fn create_router<R>(postern: Arc<Postern<R>>, options: CallbackOptions) -> Router
where
    R: RefreshTokenRepository,
{
    let state = AuthState { postern };

    Router::new()
        .route("/login", get(login_handler))
        .route("/callback", get(callback_handler))
        .with_state(state)
        .layer(axum::Extension(options))
}

/// A 302 with a `Location` header. axum's `Redirect` only offers 303/307/308
/// and the provider contract is plain `Found`.
fn found(location: &str) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
}

/// Start the authorization code flow: stash the CSRF state in a short-lived
/// cookie and send the browser to the provider.
async fn login_handler<R>(
    State(state): State<AuthState<R>>,
    axum::Extension(options): axum::Extension<CallbackOptions>,
    jar: CookieJar,
) -> Response
where
    R: RefreshTokenRepository,
{
    let start = match state.postern.begin_login() {
        Ok(start) => start,
        Err(err) => {
            tracing::error!(error = %err, "Failed to start login");
            return AuthError::from(err).into_response();
        }
    };

    let cookie = Cookie::build((STATE_COOKIE, start.state))
        .path("/")
        .http_only(true)
        .secure(options.cookie.secure)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cookie), found(&start.authorize_url)).into_response()
}

/// Receive the provider's redirect and complete the login.
///
/// The state cookie is read and then expired up front, so it is single-use
/// whether the callback succeeds, fails validation, or fails the exchange —
/// the removal rides on every branch's response.
async fn callback_handler<R>(
    State(state): State<AuthState<R>>,
    axum::Extension(options): axum::Extension<CallbackOptions>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Response
where
    R: RefreshTokenRepository,
{
    let state_cookie = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(Cookie::build((STATE_COOKIE, "")).path("/").build());

    let (Some(code), Some(callback_state)) = (query.code, query.state) else {
        return (jar, AuthError::BadCallback).into_response();
    };

    match state
        .postern
        .complete_login(&code, &callback_state, state_cookie.as_deref())
        .await
    {
        Ok(outcome) => {
            let same_site = match options.cookie.same_site {
                CookieSameSite::Strict => SameSite::Strict,
                CookieSameSite::Lax => SameSite::Lax,
                CookieSameSite::None => SameSite::None,
            };

            let cookie = Cookie::build((options.cookie.name.clone(), outcome.token.to_string()))
                .path(options.cookie.path.clone())
                .http_only(options.cookie.http_only)
                .secure(options.cookie.secure)
                .same_site(same_site)
                .build();

            (jar.add(cookie), found(&options.landing_path)).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Login callback failed");
            (jar, AuthError::from(err)).into_response()
        }
    }
}
