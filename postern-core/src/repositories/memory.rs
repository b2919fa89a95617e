use async_trait::async_trait;
use dashmap::DashMap;

use crate::{Error, repositories::RefreshTokenRepository, session::SessionId};

/// In-memory refresh-token store backed by a concurrent map.
///
/// Suitable for single-process deployments and tests. Values survive only as
/// long as the process; anything longer-lived needs a caller-provided
/// implementation of [`RefreshTokenRepository`].
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: DashMap<SessionId, String>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions with a stored refresh token.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenStore {
    async fn store(&self, session_id: &SessionId, refresh_token: &str) -> Result<(), Error> {
        self.tokens
            .insert(session_id.clone(), refresh_token.to_string());
        Ok(())
    }

    async fn find(&self, session_id: &SessionId) -> Result<Option<String>, Error> {
        Ok(self.tokens.get(session_id).map(|entry| entry.clone()))
    }

    async fn remove(&self, session_id: &SessionId) -> Result<(), Error> {
        self.tokens.remove(session_id);
        Ok(())
    }
}
