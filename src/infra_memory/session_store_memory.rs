use crate::application_port::SessionError;
use crate::domain_model::SessionKey;
use crate::domain_port::SessionStore;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

struct Entry {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Process-local store. Expired entries are dropped on every write and when they are next read.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, Entry>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, key: &SessionKey, token: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let now = Utc::now();
        let expires_at = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| SessionError::Store(format!("ttl out of range: {}", ttl_secs)))?;
        self.entries.retain(|_, entry| entry.expires_at > now);
        self.entries.insert(
            key.to_string(),
            Entry {
                token: token.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &SessionKey) -> Result<Option<String>, SessionError> {
        let now = Utc::now();
        {
            let Some(entry) = self.entries.get(key.as_str()) else {
                return Ok(None);
            };
            if entry.expires_at > now {
                return Ok(Some(entry.token.clone()));
            }
        }
        self.entries
            .remove_if(key.as_str(), |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn delete(&self, key: &SessionKey) -> Result<bool, SessionError> {
        let now = Utc::now();
        Ok(self
            .entries
            .remove(key.as_str())
            .is_some_and(|(_, entry)| entry.expires_at > now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> SessionKey {
        SessionKey(s.to_string())
    }

    #[tokio::test]
    async fn put_overwrites_previous_token() {
        let store = MemorySessionStore::new();
        store.put(&key("user-1"), "a", 60).await.unwrap();
        store.put(&key("user-1"), "b", 60).await.unwrap();
        assert_eq!(store.get(&key("user-1")).await.unwrap().as_deref(), Some("b"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_removal() {
        let store = MemorySessionStore::new();
        store.put(&key("user-1"), "a", 60).await.unwrap();
        assert!(store.delete(&key("user-1")).await.unwrap());
        assert!(!store.delete(&key("user-1")).await.unwrap());
        assert!(store.get(&key("user-1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_entry_is_gone_on_read() {
        let store = MemorySessionStore::new();
        store.put(&key("user-1"), "a", 1).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        assert!(store.get(&key("user-1")).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn put_sweeps_expired_entries() {
        let store = MemorySessionStore::new();
        for i in 0..100 {
            store.put(&key(&format!("user-{}", i)), "a", 1).await.unwrap();
        }
        store.put(&key("admin-1"), "b", 60).await.unwrap();
        assert_eq!(store.len(), 101);

        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        store.put(&key("admin-2"), "c", 60).await.unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&key("admin-1")).await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn oversized_ttl_is_rejected() {
        let store = MemorySessionStore::new();
        let result = store.put(&key("user-1"), "a", u64::MAX).await;
        assert!(matches!(result, Err(SessionError::Store(_))));
        assert!(store.is_empty());
    }
}
