//! Identity-provider client for the authorization-code flow.
//!
//! This crate speaks exactly the three provider URLs the callback component
//! needs: the authorize endpoint (URL construction only), the token endpoint
//! (code-for-token exchange) and the userinfo endpoint (token-for-profile
//! exchange). It is not a general OAuth client; everything it parses is
//! validated against the fields the flow requires.
//!
//! # Examples
//! ```rust,no_run
//! use postern_oauth::Provider;
//!
//! # fn main() -> Result<(), postern_core::Error> {
//! // Using the preset for a UNiDAYS-style OpenID server
//! let provider = Provider::unidays(
//!     "https://account.example-provider.com",
//!     "my-client-id",
//!     "my-client-secret",
//!     "https://myapp.example.com/callback",
//! )?;
//!
//! // Or the builder, endpoint by endpoint
//! let provider = Provider::builder("unidays")
//!     .base_url("https://account.example-provider.com")
//!     .client_id("my-client-id")
//!     .client_secret("my-client-secret")
//!     .redirect_uri("https://myapp.example.com/callback")
//!     .add_scope("verification")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod wire;

pub use wire::TokenExchange;

use std::time::Duration;

use postern_core::{
    Error, UserProfile,
    error::{ProviderError, ValidationError},
};
use wire::{RawTokenResponse, RawUserInfo};

/// Bound on each outbound provider call. A hung provider must not hold the
/// callback handler open indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_SCOPES: [&str; 4] = ["openid", "name", "email", "verification"];

/// A configured identity provider.
///
/// Holds the endpoint set, client credentials and a bounded-timeout HTTP
/// client. One instance serves all concurrent callbacks.
pub struct Provider {
    /// The provider name, e.g. "unidays". Used in logs only.
    name: String,
    authorize_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<String>,
    http: reqwest::Client,
}

impl Provider {
    pub fn builder(name: &str) -> ProviderBuilder {
        ProviderBuilder::new(name)
    }

    /// Preset for a UNiDAYS-style OpenID server: `{base}/oauth/authorize`,
    /// `{base}/oauth/token`, `{base}/oauth/userinfo`, scopes
    /// `openid name email verification`.
    pub fn unidays(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, Error> {
        ProviderBuilder::new("unidays")
            .base_url(base_url)
            .client_id(client_id)
            .client_secret(client_secret)
            .redirect_uri(redirect_uri)
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Build the URL to redirect the browser to for login.
    pub fn authorization_url(&self, state: &str) -> Result<String, Error> {
        let url = url::Url::parse_with_params(
            &self.authorize_endpoint,
            [
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", self.scopes.join(" ").as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| {
            ValidationError::InvalidField(format!("Invalid authorize endpoint: {e}"))
        })?;

        Ok(url.to_string())
    }

    /// Exchange an authorization code for tokens.
    ///
    /// One POST to the token endpoint, form-encoded exactly as the provider
    /// requires. The code is single-use on the provider side; a replayed
    /// code surfaces here as a failed exchange.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchange, Error> {
        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "Token endpoint unreachable");
                ProviderError::Communication {
                    endpoint: wire::TOKEN_ENDPOINT,
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                provider = %self.name,
                status = status.as_u16(),
                "Token endpoint refused the exchange"
            );
            return Err(ProviderError::ExchangeFailed {
                endpoint: wire::TOKEN_ENDPOINT,
                status: status.as_u16(),
            }
            .into());
        }

        let raw = response.json::<RawTokenResponse>().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "Token response was not JSON");
            ProviderError::MalformedResponse {
                endpoint: wire::TOKEN_ENDPOINT,
                reason: e.to_string(),
            }
        })?;

        let exchange = TokenExchange::try_from(raw)?;

        tracing::debug!(provider = %self.name, "Exchanged authorization code for tokens");

        Ok(exchange)
    }

    /// Fetch the profile for an access token from the userinfo endpoint.
    pub async fn get_user_info(&self, access_token: &str) -> Result<UserProfile, Error> {
        let response = self
            .http
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "Userinfo endpoint unreachable");
                ProviderError::Communication {
                    endpoint: wire::USERINFO_ENDPOINT,
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                provider = %self.name,
                status = status.as_u16(),
                "Userinfo endpoint rejected the access token"
            );
            return Err(ProviderError::ExchangeFailed {
                endpoint: wire::USERINFO_ENDPOINT,
                status: status.as_u16(),
            }
            .into());
        }

        let raw = response.json::<RawUserInfo>().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "Userinfo response was not JSON");
            ProviderError::MalformedResponse {
                endpoint: wire::USERINFO_ENDPOINT,
                reason: e.to_string(),
            }
        })?;

        let profile = UserProfile::try_from(raw)?;

        tracing::debug!(
            provider = %self.name,
            subject = %profile.subject,
            "Fetched user profile"
        );

        Ok(profile)
    }
}

pub struct ProviderBuilder {
    name: String,
    authorize_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<String>,
    timeout: Duration,
}

impl ProviderBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            authorize_endpoint: String::new(),
            token_endpoint: String::new(),
            userinfo_endpoint: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Derive all three endpoints from the provider's base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        let base = base.trim_end_matches('/');
        self.authorize_endpoint = format!("{base}/oauth/authorize");
        self.token_endpoint = format!("{base}/oauth/token");
        self.userinfo_endpoint = format!("{base}/oauth/userinfo");
        self
    }

    pub fn authorize_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.authorize_endpoint = endpoint.into();
        self
    }

    pub fn token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    pub fn userinfo_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.userinfo_endpoint = endpoint.into();
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = client_secret.into();
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    pub fn add_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Override the outbound call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Provider, Error> {
        for (field, value) in [
            ("authorize endpoint", &self.authorize_endpoint),
            ("token endpoint", &self.token_endpoint),
            ("userinfo endpoint", &self.userinfo_endpoint),
            ("client id", &self.client_id),
            ("redirect uri", &self.redirect_uri),
        ] {
            if value.is_empty() {
                return Err(ValidationError::MissingField(field.to_string()).into());
            }
        }

        let http = reqwest::ClientBuilder::new()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ProviderError::Communication {
                endpoint: wire::TOKEN_ENDPOINT,
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Provider {
            name: self.name,
            authorize_endpoint: self.authorize_endpoint,
            token_endpoint: self.token_endpoint,
            userinfo_endpoint: self.userinfo_endpoint,
            client_id: self.client_id,
            client_secret: self.client_secret,
            redirect_uri: self.redirect_uri,
            scopes: self.scopes,
            http,
        })
    }
}
