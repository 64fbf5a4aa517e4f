use async_trait::async_trait;
use uuid::Uuid;

use crate::resource::core::{Record, StoreError};

// ============================================================================
// ResourceStore - Generic Persistence Capability
// ============================================================================
//
// One contract for every record kind:
// - create       assigns the id and returns the stored record
// - find_all     insertion order, never NotFound
// - find_by_id   NotFound when the id is unknown
// - update       persists a record the caller already merged
// - delete_by_id returns the removed record, NotFound when absent
//
// Every mutation is visible to all subsequent reads. There is no version
// check: concurrent updates to one record are last-write-wins.
//
// ============================================================================

#[async_trait]
pub trait ResourceStore<R: Record>: Send + Sync {
    async fn create(&self, draft: R::Draft) -> Result<R, StoreError>;

    async fn find_all(&self) -> Result<Vec<R>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<R, StoreError>;

    async fn update(&self, id: Uuid, record: R) -> Result<R, StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<R, StoreError>;
}
