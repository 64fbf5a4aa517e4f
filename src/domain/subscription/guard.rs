use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::metrics::Metrics;
use crate::resource::core::StoreError;
use crate::resource::store::ResourceStore;

use super::errors::SubscriptionError;
use super::model::EmailSubscription;

// ============================================================================
// Subscription Guard - Admission Rule
// ============================================================================
//
// Reject empty or already-known addresses, admit everything else.
//
// The known set is the persistent store itself. The duplicate check and the
// insert happen in one store operation, so two concurrent requests for the
// same new address cannot both be admitted and admissions survive restarts.
//
// ============================================================================

/// Store capability needed for atomic admission
#[async_trait]
pub trait SubscriptionStore: ResourceStore<EmailSubscription> {
    /// Insert the address unless it already exists.
    /// Returns `None` when the address was already subscribed.
    async fn create_if_absent(
        &self,
        address: &str,
    ) -> Result<Option<EmailSubscription>, StoreError>;
}

pub struct SubscriptionGuard {
    store: Arc<dyn SubscriptionStore>,
    metrics: Arc<Metrics>,
}

impl SubscriptionGuard {
    pub fn new(store: Arc<dyn SubscriptionStore>, metrics: Arc<Metrics>) -> Self {
        Self { store, metrics }
    }

    /// Pure admission decision against an explicit known set.
    /// Returns the normalised address on admission.
    pub fn evaluate(candidate: &str, known: &HashSet<String>) -> Result<String, SubscriptionError> {
        let address = normalize(candidate)?;
        if known.contains(&address) {
            return Err(SubscriptionError::Duplicate(address));
        }
        Ok(address)
    }

    /// Decide admission against the store and persist the subscription
    pub async fn admit(&self, candidate: &str) -> Result<EmailSubscription, SubscriptionError> {
        let address = match normalize(candidate) {
            Ok(address) => address,
            Err(e) => {
                self.metrics.record_subscription("rejected_empty");
                return Err(e);
            }
        };

        match self.store.create_if_absent(&address).await {
            Ok(Some(subscription)) => {
                self.metrics.record_subscription("admitted");
                tracing::info!(id = %subscription.id, "Admitted newsletter subscription");
                Ok(subscription)
            }
            Ok(None) => {
                self.metrics.record_subscription("rejected_duplicate");
                tracing::debug!("Rejected duplicate subscription");
                Err(SubscriptionError::Duplicate(address))
            }
            Err(e) => {
                self.metrics.record_subscription("failed");
                tracing::error!(error = %e, "Failed to persist subscription");
                Err(e.into())
            }
        }
    }

    #[cfg(test)]
    async fn known_addresses(&self) -> Result<HashSet<String>, SubscriptionError> {
        let subscriptions = self.store.find_all().await?;
        Ok(subscriptions.into_iter().map(|s| s.address).collect())
    }

    pub async fn list(&self) -> Result<Vec<EmailSubscription>, SubscriptionError> {
        Ok(self.store.find_all().await?)
    }
}

fn normalize(candidate: &str) -> Result<String, SubscriptionError> {
    let address = candidate.trim();
    if address.is_empty() {
        return Err(SubscriptionError::EmptyAddress);
    }
    Ok(address.to_string())
}
