use crate::domain_model::*;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidTokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    Signature,
    #[error("unreadable claims")]
    Claims,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(String),
    #[error("signing error: {0}")]
    Signing(String),
    #[error("config error: {0}")]
    Config(String),
}

#[async_trait::async_trait]
pub trait SessionService: Send + Sync {
    /// Sign a token for `identity`. Does not write to the store.
    async fn create_token(
        &self,
        identity: &Identity,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, SessionError>;

    /// Make `record.token` the current token of its identity, replacing any previous one.
    async fn insert(&self, record: SessionRecord) -> Result<(), SessionError>;

    /// Verify the signature and read the claims back. Expiry is not enforced here.
    async fn decode_token(&self, token: &str) -> Result<TokenClaims, InvalidTokenError>;

    async fn check(&self, token: &str) -> Result<SessionStatus, SessionError>;

    /// Remove the session record the token points at. Returns whether a record was removed.
    async fn delete_token(&self, token: &str) -> Result<bool, SessionError>;

    async fn stored_token(&self, identity: &Identity) -> Result<Option<String>, SessionError>;

    /// `create_token` with the default lifetime, then `insert`.
    async fn open_session(&self, identity: &Identity) -> Result<IssuedSession, SessionError>;
}
