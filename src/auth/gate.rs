use std::sync::Arc;

use crate::metrics::Metrics;

use super::provider::{AuthProvider, Credentials};
use super::session::SessionStore;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    Denied,

    #[error("Missing or expired admin session")]
    Unauthenticated,
}

/// Grants or denies the administrative view.
///
/// A successful login issues a session token; admin requests present that
/// token instead of repeating the credential check.
pub struct AuthGate {
    provider: Arc<dyn AuthProvider>,
    sessions: SessionStore,
    metrics: Arc<Metrics>,
}

impl AuthGate {
    pub fn new(provider: Arc<dyn AuthProvider>, sessions: SessionStore, metrics: Arc<Metrics>) -> Self {
        Self {
            provider,
            sessions,
            metrics,
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let granted = self.provider.authenticate(credentials).await;
        self.metrics.record_login(granted);

        if !granted {
            tracing::warn!("Admin login denied");
            return Err(AuthError::Denied);
        }

        tracing::info!("Admin login granted");
        Ok(self.sessions.issue().await)
    }

    pub async fn authorize(&self, token: Option<&str>) -> Result<(), AuthError> {
        match token {
            Some(token) if self.sessions.validate(token).await => Ok(()),
            _ => Err(AuthError::Unauthenticated),
        }
    }

    pub async fn logout(&self, token: &str) {
        if self.sessions.revoke(token).await {
            tracing::info!("Admin session revoked");
        }
    }

    pub fn session_ttl_secs(&self) -> u64 {
        self.sessions.ttl().as_secs()
    }
}
