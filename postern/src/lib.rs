//! # Postern
//!
//! Postern is a reusable authentication-callback component for identity
//! providers that speak the OAuth2 Authorization Code flow with an OIDC
//! userinfo endpoint. It owns the one piece of the login dance that has
//! real protocol semantics: the callback. CSRF-state validation, the
//! code-for-token exchange, the token-for-profile exchange and the issuance
//! of a tamper-evident local session all happen here, in that order, with
//! no partial result ever escaping a failure.
//!
//! The component is parameterized by provider configuration and storage; it
//! is consumed by whichever request-routing layer the surrounding system
//! uses (`postern-axum` provides one).
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use postern::{JwtConfig, Postern, Provider};
//! use postern_core::InMemoryRefreshTokenStore;
//!
//! # async fn run() -> Result<(), postern_core::Error> {
//! let provider = Provider::unidays(
//!     "https://account.example-provider.com",
//!     std::env::var("CLIENT_ID").unwrap(),
//!     std::env::var("CLIENT_SECRET").unwrap(),
//!     "https://myapp.example.com/callback",
//! )?;
//!
//! let postern = Postern::new(
//!     provider,
//!     Arc::new(InMemoryRefreshTokenStore::new()),
//!     JwtConfig::new_hs256(b"use-a-real-key".to_vec()),
//! );
//!
//! // At login initiation: store `start.state` in a short-lived cookie and
//! // redirect the browser to `start.authorize_url`.
//! let start = postern.begin_login()?;
//!
//! // At the callback: hand over the query parameters and the cookie value.
//! let outcome = postern
//!     .complete_login("code-from-query", "state-from-query", Some(start.state.as_str()))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::Duration;
use postern_core::{
    RefreshTokenRepository, SessionService,
    error::AuthError,
    id::generate_random_string,
};

/// Re-export core types from postern_core
///
/// These types are commonly used when working with the Postern API.
pub use postern_core::{
    Error, InMemoryRefreshTokenStore, JwtAlgorithm, JwtClaims, JwtConfig, Session, SessionId,
    SessionToken, SubjectId, UserProfile, VerificationStatus,
};

/// Re-export the provider client
pub use postern_oauth::{Provider, ProviderBuilder, TokenExchange};

/// The configuration for issued sessions.
pub struct SessionConfig {
    /// The duration until a session expires
    pub expires_in: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expires_in: Duration::days(30),
        }
    }
}

/// The two values produced by login initiation.
///
/// The state is the CSRF nonce; it must round-trip through a short-lived
/// cookie and come back on the callback.
#[derive(Debug)]
pub struct LoginStart {
    pub state: String,
    pub authorize_url: String,
}

/// Everything a successful callback yields.
///
/// The profile and session are consumed by the caller; the token is what
/// gets handed to the browser.
#[derive(Debug)]
pub struct LoginOutcome {
    pub profile: UserProfile,
    pub session: Session,
    pub token: SessionToken,
}

/// The authentication-callback component.
///
/// One instance serves all concurrent callbacks; the only shared mutable
/// state is the refresh-token store behind `R`.
pub struct Postern<R: RefreshTokenRepository> {
    provider: Provider,
    refresh_tokens: Arc<R>,
    sessions: SessionService,
}

impl<R: RefreshTokenRepository> Postern<R> {
    /// Create a new Postern instance with the default session lifetime.
    pub fn new(provider: Provider, refresh_tokens: Arc<R>, jwt: JwtConfig) -> Self {
        Self::with_session_config(provider, refresh_tokens, jwt, SessionConfig::default())
    }

    pub fn with_session_config(
        provider: Provider,
        refresh_tokens: Arc<R>,
        jwt: JwtConfig,
        config: SessionConfig,
    ) -> Self {
        Self {
            provider,
            refresh_tokens,
            sessions: SessionService::new(jwt, config.expires_in),
        }
    }

    /// Start a login: mint a fresh CSRF state and the authorize URL to
    /// redirect the browser to.
    ///
    /// The caller must stash the state where only this browser can echo it
    /// back (an HttpOnly cookie) before redirecting.
    pub fn begin_login(&self) -> Result<LoginStart, Error> {
        let state = generate_random_string(32);
        let authorize_url = self.provider.authorization_url(&state)?;

        tracing::debug!(provider = %self.provider.name(), "Starting authorization code flow");

        Ok(LoginStart {
            state,
            authorize_url,
        })
    }

    /// Complete a login from the provider's redirect.
    ///
    /// `state` is the query parameter echoed by the provider;
    /// `state_cookie` is the value stashed by [`begin_login`](Self::begin_login),
    /// if the browser still has it. The steps run strictly in order:
    ///
    /// 1. CSRF gate — on mismatch or missing cookie nothing is sent to the
    ///    provider.
    /// 2. Code-for-token exchange.
    /// 3. Token-for-profile exchange, only with a usable access token.
    /// 4. Session issuance and refresh-token persistence, all-or-nothing.
    ///
    /// Cancellation of the surrounding request future drops whichever
    /// outbound call is in flight; nothing is spawned.
    pub async fn complete_login(
        &self,
        code: &str,
        state: &str,
        state_cookie: Option<&str>,
    ) -> Result<LoginOutcome, Error> {
        let Some(expected_state) = state_cookie else {
            tracing::warn!("Callback arrived without a state cookie");
            return Err(AuthError::CsrfMismatch.into());
        };

        // Deliberately not logging either value.
        if state != expected_state {
            tracing::warn!("Callback state does not match the state cookie");
            return Err(AuthError::CsrfMismatch.into());
        }

        let exchange = self.provider.exchange_code(code).await?;

        let profile = self.provider.get_user_info(&exchange.access_token).await?;

        // Signing is pure, so doing it before the store means a storage
        // failure leaves no session anywhere.
        let (session, token) = self.sessions.issue(&profile)?;

        self.refresh_tokens
            .store(&session.id, &exchange.refresh_token)
            .await?;

        tracing::info!(
            provider = %self.provider.name(),
            subject = %profile.subject,
            session_id = %session.id,
            "Login completed"
        );

        Ok(LoginOutcome {
            profile,
            session,
            token,
        })
    }

    /// Verify a session token presented by a downstream consumer.
    pub fn verify_session(&self, token: &SessionToken) -> Result<Session, Error> {
        self.sessions.verify(token)
    }

    /// The refresh token persisted for a session, if any.
    ///
    /// Minting new access tokens with it is an out-of-band concern; this
    /// component only stores and hands it back.
    pub async fn refresh_token(&self, session_id: &SessionId) -> Result<Option<String>, Error> {
        self.refresh_tokens.find(session_id).await
    }

    /// Drop the refresh token for a session, e.g. on logout.
    pub async fn revoke(&self, session_id: &SessionId) -> Result<(), Error> {
        self.refresh_tokens.remove(session_id).await?;

        tracing::debug!(session_id = %session_id, "Revoked refresh token");

        Ok(())
    }
}
