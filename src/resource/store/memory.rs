use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::subscription::{EmailSubscription, NewSubscription, SubscriptionStore};
use crate::resource::core::{Record, StoreError};

use super::resource_store::ResourceStore;

// ============================================================================
// In-Memory Resource Store
// ============================================================================
//
// Process-local store used by tests and by `DATABASE_URL=memory`.
// Records are kept in insertion order behind an async RwLock.
//
// ============================================================================

pub struct InMemoryStore<R: Record> {
    records: RwLock<Vec<R>>,
    unavailable: AtomicBool,
}

impl<R: Record> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every operation fail with a persistence error, simulating an outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Persistence(format!("{} store unavailable", R::KIND)));
        }
        Ok(())
    }
}

impl<R: Record> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> ResourceStore<R> for InMemoryStore<R> {
    async fn create(&self, draft: R::Draft) -> Result<R, StoreError> {
        self.check_available()?;

        let record = R::from_draft(Uuid::new_v4(), draft);
        self.records.write().await.push(record.clone());

        tracing::debug!(kind = R::KIND, id = %record.id(), "Created record in memory");
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<R>, StoreError> {
        self.check_available()?;
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<R, StoreError> {
        self.check_available()?;
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(R::KIND, id))
    }

    async fn update(&self, id: Uuid, record: R) -> Result<R, StoreError> {
        self.check_available()?;
        if record.id() != id {
            return Err(StoreError::id_mismatch(R::KIND, id, record.id()));
        }

        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| StoreError::not_found(R::KIND, id))?;
        *slot = record.clone();

        Ok(record)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<R, StoreError> {
        self.check_available()?;

        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| StoreError::not_found(R::KIND, id))?;

        Ok(records.remove(position))
    }
}

#[async_trait]
impl SubscriptionStore for InMemoryStore<EmailSubscription> {
    async fn create_if_absent(
        &self,
        address: &str,
    ) -> Result<Option<EmailSubscription>, StoreError> {
        self.check_available()?;

        // The write lock spans the check and the insert
        let mut records = self.records.write().await;
        if records.iter().any(|s| s.address == address) {
            return Ok(None);
        }

        let subscription = EmailSubscription::from_draft(
            Uuid::new_v4(),
            NewSubscription {
                address: address.to_string(),
            },
        );
        records.push(subscription.clone());
        Ok(Some(subscription))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{Event, NewEvent};
    use chrono::NaiveDate;

    fn draft(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: "Annual gala".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find_by_id() {
        let store = InMemoryStore::<Event>::new();

        let created = store.create(draft("Gala")).await.unwrap();
        let found = store.find_by_id(created.id).await.unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = InMemoryStore::<Event>::new();
        assert!(store.find_all().await.unwrap().is_empty());

        for title in ["first", "second", "third"] {
            store.create(draft(title)).await.unwrap();
        }

        let titles: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = InMemoryStore::<Event>::new();
        let orphan = Event::from_draft(Uuid::new_v4(), draft("Gala"));

        let result = store.update(orphan.id, orphan).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_rejects_id_mismatch() {
        let store = InMemoryStore::<Event>::new();
        let created = store.create(draft("Gala")).await.unwrap();
        let other = Event::from_draft(Uuid::new_v4(), draft("Other"));

        let result = store.update(created.id, other).await;
        assert!(matches!(result, Err(StoreError::Persistence(_))));
        assert_eq!(store.find_by_id(created.id).await.unwrap().title, "Gala");
    }

    #[tokio::test]
    async fn test_delete_then_find_is_not_found() {
        let store = InMemoryStore::<Event>::new();
        let created = store.create(draft("Gala")).await.unwrap();

        let removed = store.delete_by_id(created.id).await.unwrap();
        assert_eq!(removed.id, created.id);

        let result = store.find_by_id(created.id).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));

        let again = store.delete_by_id(created.id).await;
        assert!(matches!(again, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_with_persistence_error() {
        let store = InMemoryStore::<Event>::new();
        store.set_unavailable(true);

        let result = store.create(draft("Gala")).await;
        assert!(matches!(result, Err(StoreError::Persistence(_))));

        store.set_unavailable(false);
        assert!(store.create(draft("Gala")).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_if_absent_detects_existing_address() {
        let store = InMemoryStore::<EmailSubscription>::new();

        assert!(store.create_if_absent("a@x.com").await.unwrap().is_some());
        assert!(store.create_if_absent("a@x.com").await.unwrap().is_none());
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
