//! # Postern Axum Integration
//!
//! This crate provides Axum routes and middleware for the postern
//! authentication callback. It wires the component's two HTTP endpoints —
//! login initiation and the provider callback — into a router you can merge
//! into your application, plus middleware and extractors so protected
//! handlers can require a verified session.
//!
//! ## Endpoints
//!
//! - `GET /login` — mints a CSRF state, sets the `state` cookie, 302 to the
//!   provider's authorize URL
//! - `GET /callback` — validates the state, exchanges the code, fetches the
//!   profile, sets the signed session cookie, 302 to the landing path
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{Router, routing::get};
//! use postern::{JwtConfig, Postern, Provider};
//! use postern_core::InMemoryRefreshTokenStore;
//! use postern_axum::{AuthSession, AuthState, CookieConfig, auth_middleware, routes};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = Provider::unidays(
//!         "https://account.example-provider.com",
//!         "client-id",
//!         "client-secret",
//!         "http://localhost:8080/callback",
//!     )
//!     .unwrap();
//!
//!     let postern = Arc::new(Postern::new(
//!         provider,
//!         Arc::new(InMemoryRefreshTokenStore::new()),
//!         JwtConfig::new_hs256(b"use-a-real-key".to_vec()),
//!     ));
//!
//!     // Create auth routes with a development cookie configuration
//!     let auth_routes = routes(postern.clone())
//!         .with_cookie_config(CookieConfig::development())
//!         .build();
//!
//!     let auth_state = AuthState {
//!         postern: postern.clone(),
//!     };
//!
//!     let app = Router::new()
//!         .route("/me", get(me_handler))
//!         .layer(axum::middleware::from_fn_with_state(
//!             auth_state,
//!             auth_middleware::<InMemoryRefreshTokenStore>,
//!         ))
//!         .merge(auth_routes);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//!
//! async fn me_handler(AuthSession(session): AuthSession) -> String {
//!     format!("Signed in as {}", session.subject)
//! }
//! ```

mod error;
mod extractors;
mod middleware;
mod routes;
mod types;

pub use error::{AuthError, Result};
pub use extractors::{AuthSession, OptionalAuthSession, SessionTokenFromCookie};
pub use middleware::{AuthState, auth_middleware, require_auth};
pub use routes::create_router;
pub use types::{CallbackOptions, CallbackQuery, CookieConfig, CookieSameSite, STATE_COOKIE};

use axum::Router;
use postern::Postern;
use postern_core::RefreshTokenRepository;
use std::sync::Arc;

/// Create the authentication routes for your Axum application.
///
/// Returns a builder; the finished router can be merged or nested into the
/// application at any path. The callback route must match the redirect URI
/// registered with the provider.
pub fn routes<R>(postern: Arc<Postern<R>>) -> AuthRouterBuilder<R>
where
    R: RefreshTokenRepository,
{
    AuthRouterBuilder {
        postern,
        options: CallbackOptions::default(),
    }
}

/// Builder for configuring the authentication routes
pub struct AuthRouterBuilder<R: RefreshTokenRepository> {
    postern: Arc<Postern<R>>,
    options: CallbackOptions,
}

impl<R: RefreshTokenRepository> AuthRouterBuilder<R> {
    /// Set a custom session cookie configuration
    pub fn with_cookie_config(mut self, config: CookieConfig) -> Self {
        self.options.cookie = config;
        self
    }

    /// Where to send the browser after a successful login (default `/`)
    pub fn with_landing_path(mut self, path: impl Into<String>) -> Self {
        self.options.landing_path = path.into();
        self
    }

    /// Build the router with the configured options
    pub fn build(self) -> Router {
        create_router(self.postern, self.options)
    }
}

impl<R: RefreshTokenRepository> From<AuthRouterBuilder<R>> for Router {
    fn from(builder: AuthRouterBuilder<R>) -> Self {
        builder.build()
    }
}
