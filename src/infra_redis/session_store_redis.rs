use crate::application_port::SessionError;
use crate::domain_model::SessionKey;
use crate::domain_port::SessionStore;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

pub struct RedisSessionStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisSessionStore {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, key: &SessionKey) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.prefix, key)
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, key: &SessionKey, token: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let key = self.key(key);
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(&key, token, ttl_secs)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &SessionKey) -> Result<Option<String>, SessionError> {
        let key = self.key(key);
        let mut conn = self.conn.clone();
        let val: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;
        Ok(val)
    }

    async fn delete(&self, key: &SessionKey) -> Result<bool, SessionError> {
        let key = self.key(key);
        let mut conn = self.conn.clone();
        let removed: i64 = conn
            .del(&key)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;
        Ok(removed > 0)
    }
}
