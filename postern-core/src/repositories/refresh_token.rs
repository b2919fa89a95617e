use crate::{Error, session::SessionId};
use async_trait::async_trait;

/// Repository for refresh-token data access.
///
/// Tokens are keyed by session id so concurrent logins cannot clobber each
/// other; storing a token for an existing key replaces the previous value
/// (last writer wins, each key belongs to exactly one session).
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Store the refresh token for a session, replacing any prior value.
    async fn store(&self, session_id: &SessionId, refresh_token: &str) -> Result<(), Error>;

    /// Fetch the refresh token for a session, if one is stored.
    async fn find(&self, session_id: &SessionId) -> Result<Option<String>, Error>;

    /// Remove the refresh token for a session.
    async fn remove(&self, session_id: &SessionId) -> Result<(), Error>;
}
