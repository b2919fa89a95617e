use chrono::Duration;

use crate::{
    Error,
    profile::UserProfile,
    session::{JwtConfig, Session, SessionToken},
};

/// Service for issuing and verifying signed sessions.
pub struct SessionService {
    jwt: JwtConfig,
    expires_in: Duration,
}

impl SessionService {
    /// Create a new SessionService with the given signing configuration and
    /// session lifetime.
    pub fn new(jwt: JwtConfig, expires_in: Duration) -> Self {
        Self { jwt, expires_in }
    }

    /// Derive a session from a provider profile and sign it.
    ///
    /// Issuance is all-or-nothing: if signing fails, no session exists.
    pub fn issue(&self, profile: &UserProfile) -> Result<(Session, SessionToken), Error> {
        let session = Session::from_profile(profile, self.expires_in);
        let claims = session.to_jwt_claims(self.jwt.issuer.clone());
        let token = SessionToken::issue(&claims, &self.jwt)?;

        tracing::debug!(
            session_id = %session.id,
            subject = %session.subject,
            expires_at = %session.expires_at,
            "Issued session"
        );

        Ok((session, token))
    }

    /// Verify a session token and reconstruct the session it carries.
    ///
    /// Rejects tampered, mis-issued, and expired tokens.
    pub fn verify(&self, token: &SessionToken) -> Result<Session, Error> {
        let claims = token.verify(&self.jwt)?;
        Ok(Session::from_jwt_claims(&claims))
    }
}
