//! A minimal server wiring the callback component against a real provider.
//!
//! Configuration comes from the environment:
//!
//! ```sh
//! export UNIDAYS_BASE_URL="https://account.example-provider.com"
//! export UNIDAYS_CLIENT_ID="..."
//! export UNIDAYS_CLIENT_SECRET="..."
//! export UNIDAYS_REDIRECT_URI="http://localhost:8080/callback"
//! export SESSION_SECRET="a-long-random-secret"
//! cargo run --example callback_server
//! ```

use std::{env, sync::Arc};

use axum::{Router, routing::get};
use postern::{JwtConfig, Postern, Provider};
use postern_axum::{AuthSession, AuthState, CookieConfig, auth_middleware, routes};
use postern_core::InMemoryRefreshTokenStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let provider = Provider::unidays(
        env::var("UNIDAYS_BASE_URL").expect("UNIDAYS_BASE_URL not set"),
        env::var("UNIDAYS_CLIENT_ID").expect("UNIDAYS_CLIENT_ID not set"),
        env::var("UNIDAYS_CLIENT_SECRET").expect("UNIDAYS_CLIENT_SECRET not set"),
        env::var("UNIDAYS_REDIRECT_URI").expect("UNIDAYS_REDIRECT_URI not set"),
    )
    .expect("invalid provider configuration");

    let secret = env::var("SESSION_SECRET").expect("SESSION_SECRET not set");

    let postern = Arc::new(Postern::new(
        provider,
        Arc::new(InMemoryRefreshTokenStore::new()),
        JwtConfig::new_hs256(secret.into_bytes()),
    ));

    let auth_routes = routes(postern.clone())
        .with_cookie_config(CookieConfig::development())
        .build();

    let auth_state = AuthState {
        postern: postern.clone(),
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/me", get(me_handler))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware::<InMemoryRefreshTokenStore>,
        ))
        .merge(auth_routes);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
    tracing::info!("Listening on http://localhost:8080");
    axum::serve(listener, app).await.unwrap();
}

async fn index_handler() -> &'static str {
    "Visit /login to sign in, then /me to see your session."
}

async fn me_handler(AuthSession(session): AuthSession) -> String {
    format!(
        "Signed in as {} (type: {}, verified: {}, session {})",
        session.subject,
        session.user_type.as_deref().unwrap_or("unknown"),
        session.verified,
        session.id,
    )
}
