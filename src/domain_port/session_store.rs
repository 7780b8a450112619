use crate::application_port::SessionError;
use crate::domain_model::SessionKey;

/// Holds at most one token per session key, each with its own time-to-live.
///
/// Expiry is always relative: `put` behaves like `SET key token EX ttl_secs`.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, key: &SessionKey, token: &str, ttl_secs: u64) -> Result<(), SessionError>;
    async fn get(&self, key: &SessionKey) -> Result<Option<String>, SessionError>;
    /// Returns whether a live record was removed.
    async fn delete(&self, key: &SessionKey) -> Result<bool, SessionError>;
}
