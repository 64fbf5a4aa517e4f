use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

// ============================================================================
// Session Store
// ============================================================================
//
// Opaque admin session tokens with a fixed lifetime. Expired entries are
// swept on every access.
//
// ============================================================================

pub struct SessionStore {
    sessions: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a new token valid for the configured lifetime
    pub async fn issue(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Instant::now();

        let mut sessions = self.sessions.lock().await;
        cleanup_expired(&mut sessions, now, self.ttl);
        sessions.insert(token.clone(), now);

        token
    }

    pub async fn validate(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        cleanup_expired(&mut sessions, Instant::now(), self.ttl);
        sessions.contains_key(token)
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.lock().await.remove(token).is_some()
    }
}

fn cleanup_expired(sessions: &mut HashMap<String, Instant>, now: Instant, ttl: Duration) {
    sessions.retain(|_, issued_at| now.duration_since(*issued_at) < ttl);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issued_token_validates_until_revoked() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.issue().await;

        assert!(store.validate(&token).await);
        assert!(store.revoke(&token).await);
        assert!(!store.validate(&token).await);
        assert!(!store.revoke(&token).await);
    }

    #[tokio::test]
    async fn test_token_expires() {
        let store = SessionStore::new(Duration::from_millis(50));
        let token = store.issue().await;

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!store.validate(&token).await);
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.issue().await;

        assert!(!store.validate("not-a-token").await);
    }
}
