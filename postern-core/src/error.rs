use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// The `state` query parameter did not match the state cookie, or the
    /// cookie was missing. Deliberately carries no detail about which side
    /// was wrong.
    #[error("State mismatch")]
    CsrfMismatch,

    #[error("Missing callback parameter: {0}")]
    MissingCallbackParam(&'static str),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request to {endpoint} failed: {reason}")]
    Communication {
        endpoint: &'static str,
        reason: String,
    },

    #[error("Provider {endpoint} endpoint returned status {status}")]
    ExchangeFailed { endpoint: &'static str, status: u16 },

    /// The provider answered 2xx but the body was missing a required field
    /// or was not the JSON shape we expect. Logged separately from plain
    /// communication failures so misbehaving deployments show up in
    /// diagnostics.
    #[error("Malformed {endpoint} response: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session expired")]
    Expired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("JWT signing failed: {0}")]
    JwtSigning(String),

    #[error("JWT verification failed: {0}")]
    JwtVerification(String),
}

impl Error {
    /// True for failures caused by the inbound request itself, which map to
    /// client-side HTTP statuses. Everything else is the provider's fault
    /// or ours.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::CsrfMismatch) | Error::Auth(AuthError::MissingCallbackParam(_))
        )
    }

    /// True when the provider answered but the body didn't hold up.
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            Error::Provider(ProviderError::MalformedResponse { .. })
        )
    }
}
