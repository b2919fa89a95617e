use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use postern_core::Error;
use thiserror::Error as ThisError;

/// HTTP-facing login failures.
///
/// Bodies are deliberately generic: nothing here reveals which half of the
/// CSRF comparison was wrong, and no provider error body ever reaches the
/// browser.
#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("Bad state")]
    BadCallback,

    #[error("Login failed")]
    LoginFailed,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error")]
    Internal,
}

impl From<Error> for AuthError {
    fn from(err: Error) -> Self {
        if err.is_client_error() {
            return AuthError::BadCallback;
        }
        match err {
            Error::Provider(_) => AuthError::LoginFailed,
            Error::Session(_) => AuthError::Unauthorized,
            _ => AuthError::Internal,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::BadCallback => (StatusCode::BAD_REQUEST, "Bad state"),
            AuthError::LoginFailed => (StatusCode::BAD_GATEWAY, "Login failed"),
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
