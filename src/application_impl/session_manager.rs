use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::SessionStore;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Written into the `iss` claim.
    pub issuer: String,
    pub lifetime: Duration,
}

pub struct SessionManager {
    cfg: SessionConfig,
    signer: Arc<dyn TokenSigner>,
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(
        cfg: SessionConfig,
        signer: Arc<dyn TokenSigner>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self { cfg, signer, store }
    }

    pub fn lifetime(&self) -> Duration {
        self.cfg.lifetime
    }

    fn default_expiry(&self) -> Result<DateTime<Utc>, SessionError> {
        TimeDelta::from_std(self.cfg.lifetime)
            .ok()
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                SessionError::Config(format!("session lifetime out of range: {:?}", self.cfg.lifetime))
            })
    }

    /// Whole seconds until `until`, rounded up, never below 1.
    fn ttl_secs(until: DateTime<Utc>) -> u64 {
        let millis = (until - Utc::now()).num_milliseconds();
        if millis <= 0 {
            1
        } else {
            (millis as u64).div_ceil(1000)
        }
    }
}

#[async_trait::async_trait]
impl SessionService for SessionManager {
    async fn create_token(
        &self,
        identity: &Identity,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, SessionError> {
        let claims = TokenClaims {
            issuer: self.cfg.issuer.clone(),
            expires_at: match expires_at {
                Some(expires_at) => expires_at,
                None => self.default_expiry()?,
            },
            id: identity.id.clone(),
            kind: identity.kind.clone(),
        };
        self.signer.sign(&claims).await
    }

    async fn insert(&self, record: SessionRecord) -> Result<(), SessionError> {
        let key = record.identity.session_key();
        let ttl_secs = Self::ttl_secs(record.expires_at);
        debug!(%key, ttl_secs, "storing session");
        self.store.put(&key, &record.token, ttl_secs).await
    }

    async fn decode_token(&self, token: &str) -> Result<TokenClaims, InvalidTokenError> {
        self.signer.verify(token).await
    }

    async fn check(&self, token: &str) -> Result<SessionStatus, SessionError> {
        let claims = match self.decode_token(token).await {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "token rejected");
                return Ok(SessionStatus::not_valid(token));
            }
        };

        let key = claims.identity().session_key();
        if claims.is_expired_at(Utc::now()) {
            debug!(%key, expires_at = %claims.expires_at, "token expired, dropping session");
            self.store.delete(&key).await?;
            return Ok(SessionStatus::not_valid(token));
        }

        let stored = self.store.get(&key).await?;
        let is_logged = stored.as_deref() == Some(token);
        debug!(%key, found = stored.is_some(), is_logged, "session compared");
        Ok(SessionStatus::compared(token, is_logged))
    }

    async fn delete_token(&self, token: &str) -> Result<bool, SessionError> {
        let claims = match self.decode_token(token).await {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "nothing to delete for undecodable token");
                return Ok(false);
            }
        };
        let key = claims.identity().session_key();
        let removed = self.store.delete(&key).await?;
        debug!(%key, removed, "session deleted");
        Ok(removed)
    }

    async fn stored_token(&self, identity: &Identity) -> Result<Option<String>, SessionError> {
        self.store.get(&identity.session_key()).await
    }

    async fn open_session(&self, identity: &Identity) -> Result<IssuedSession, SessionError> {
        let expires_at = self.default_expiry()?;
        let token = self.create_token(identity, Some(expires_at)).await?;
        self.insert(SessionRecord {
            identity: identity.clone(),
            token: token.clone(),
            expires_at,
        })
        .await?;
        Ok(IssuedSession { token, expires_at })
    }
}
