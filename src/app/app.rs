use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use chrono::{TimeDelta, Utc};
use std::sync::Arc;
use std::time::Duration;

pub struct App {
    pub session_service: Arc<dyn SessionService>,
}

impl App {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let cfg = session_config(settings)?;
        if settings.session.secret.is_empty() {
            return Err(SessionError::Config("session.secret must not be empty".into()).into());
        }
        let signer: Arc<dyn TokenSigner> =
            Arc::new(JwtHs256Signer::new(settings.session.secret.as_bytes()));

        let store: Arc<dyn SessionStore> = match settings.store.backend.as_str() {
            "memory" => Arc::new(MemorySessionStore::new()),
            "redis" => {
                let redis_client = redis::Client::open(settings.store.url.as_str())?;
                let redis_manager = redis_client.get_connection_manager().await?;
                Arc::new(RedisSessionStore::new(
                    redis_manager,
                    settings.store.prefix.clone(),
                ))
            }
            other => return Err(anyhow!("Unknown store backend: {}", other)),
        };

        info!(
            backend = %settings.store.backend,
            issuer = %cfg.issuer,
            lifetime_secs = cfg.lifetime.as_secs(),
            "session manager ready"
        );

        Ok(Self {
            session_service: Arc::new(SessionManager::new(cfg, signer, store)),
        })
    }
}

fn session_config(settings: &Settings) -> Result<SessionConfig, SessionError> {
    let minutes = settings.session.lifetime_minutes;
    if minutes == 0 {
        return Err(SessionError::Config(
            "session.lifetime_minutes must be positive".into(),
        ));
    }
    let out_of_range =
        || SessionError::Config(format!("session.lifetime_minutes out of range: {}", minutes));
    let lifetime = minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(out_of_range)?;
    TimeDelta::from_std(lifetime)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .ok_or_else(out_of_range)?;
    Ok(SessionConfig {
        issuer: settings.session.server_host.clone(),
        lifetime,
    })
}
