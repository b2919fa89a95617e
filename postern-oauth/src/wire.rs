//! Typed views of the provider's JSON responses.
//!
//! The provider is not under our control, so every body is parsed into a raw
//! struct first and then checked for the fields the flow actually requires.
//! A 2xx body missing a required field is a malformed response, never a
//! silently incomplete success.

use postern_core::{
    Error, UserProfile,
    error::ProviderError,
    profile::{SubjectId, VerificationStatus},
};
use serde::Deserialize;

pub(crate) const TOKEN_ENDPOINT: &str = "token";
pub(crate) const USERINFO_ENDPOINT: &str = "userinfo";

/// The token endpoint body, before required-field validation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

/// A validated token-endpoint exchange.
///
/// Transient: lives for the duration of one callback. Only the refresh
/// token is persisted, and that happens in the flow layer.
#[derive(Debug, Clone)]
pub struct TokenExchange {
    /// Bearer credential for the userinfo call.
    pub access_token: String,
    /// Long-lived credential, persisted keyed by session.
    pub refresh_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

impl TryFrom<RawTokenResponse> for TokenExchange {
    type Error = Error;

    fn try_from(raw: RawTokenResponse) -> Result<Self, Error> {
        let access_token = raw.access_token.ok_or(ProviderError::MalformedResponse {
            endpoint: TOKEN_ENDPOINT,
            reason: "missing `access_token`".to_string(),
        })?;
        let refresh_token = raw.refresh_token.ok_or(ProviderError::MalformedResponse {
            endpoint: TOKEN_ENDPOINT,
            reason: "missing `refresh_token`".to_string(),
        })?;

        Ok(TokenExchange {
            access_token,
            refresh_token,
            token_type: raw.token_type,
            expires_in: raw.expires_in,
            scope: raw.scope,
        })
    }
}

/// The userinfo body, before required-field validation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawUserInfo {
    pub sub: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub verification_status: Option<RawVerificationStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawVerificationStatus {
    pub user_type: Option<String>,
    #[serde(default)]
    pub verified: BoolLike,
}

/// The provider has been observed emitting `verified` both as a JSON bool
/// and as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum BoolLike {
    Bool(bool),
    Str(String),
}

impl Default for BoolLike {
    fn default() -> Self {
        BoolLike::Bool(false)
    }
}

impl BoolLike {
    fn as_bool(&self) -> bool {
        match self {
            BoolLike::Bool(b) => *b,
            BoolLike::Str(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

impl TryFrom<RawUserInfo> for UserProfile {
    type Error = Error;

    fn try_from(raw: RawUserInfo) -> Result<Self, Error> {
        let sub = raw
            .sub
            .filter(|s| !s.is_empty())
            .ok_or(ProviderError::MalformedResponse {
                endpoint: USERINFO_ENDPOINT,
                reason: "missing `sub`".to_string(),
            })?;

        let verification = raw
            .verification_status
            .map(|vs| VerificationStatus {
                user_type: vs.user_type,
                verified: vs.verified.as_bool(),
            })
            .unwrap_or_default();

        UserProfile::builder()
            .subject(SubjectId::new(&sub))
            .given_name(raw.given_name)
            .family_name(raw.family_name)
            .email(raw.email)
            .verification(verification)
            .build()
    }
}
