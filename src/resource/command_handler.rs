use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::media::{ImageAttachmentHandler, ImageUpload, MediaError};
use crate::metrics::Metrics;

use super::core::{Content, StoreError};
use super::store::ResourceStore;

// ============================================================================
// Content Command Handler
// ============================================================================
//
// Orchestrates: Command → Image → Merge → ResourceStore
//
// The image is written before the record mutation and removed again if the
// mutation fails, so no record ever points at a missing file and no failed
// request leaves a fresh upload behind.
//
// ============================================================================

pub enum ContentCommand<R: Content> {
    Create {
        draft: R::Draft,
        image: Option<ImageUpload>,
    },
    Update {
        id: Uuid,
        patch: R::Patch,
        image: Option<ImageUpload>,
    },
    Delete {
        id: Uuid,
    },
}

impl<R: Content> ContentCommand<R> {
    fn name(&self) -> &'static str {
        match self {
            ContentCommand::Create { .. } => "create",
            ContentCommand::Update { .. } => "update",
            ContentCommand::Delete { .. } => "delete",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

impl ContentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::Store(e) if e.is_not_found())
    }
}

pub struct ContentCommandHandler<R: Content> {
    store: Arc<dyn ResourceStore<R>>,
    images: Arc<ImageAttachmentHandler>,
    metrics: Arc<Metrics>,
}

impl<R: Content> ContentCommandHandler<R> {
    pub fn new(
        store: Arc<dyn ResourceStore<R>>,
        images: Arc<ImageAttachmentHandler>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            store,
            images,
            metrics,
        }
    }

    /// Handle a command. Create and update return the stored record, delete
    /// returns the record that was removed.
    pub async fn handle(&self, command: ContentCommand<R>) -> Result<R, ContentError> {
        let name = command.name();
        let started = Instant::now();

        let result = match command {
            ContentCommand::Create { draft, image } => self.create(draft, image).await,
            ContentCommand::Update { id, patch, image } => self.update(id, patch, image).await,
            ContentCommand::Delete { id } => self.delete(id).await,
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) if e.is_not_found() => "not_found",
            Err(_) => "error",
        };
        self.metrics
            .record_command(R::KIND, name, outcome, started.elapsed().as_secs_f64());

        result
    }

    pub async fn find_all(&self) -> Result<Vec<R>, ContentError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<R, ContentError> {
        Ok(self.store.find_by_id(id).await?)
    }

    async fn create(&self, mut draft: R::Draft, image: Option<ImageUpload>) -> Result<R, ContentError> {
        let reference = self.images.store(image).await?;
        R::attach_image(&mut draft, reference.clone());

        match self.store.create(draft).await {
            Ok(record) => {
                tracing::info!(kind = R::KIND, id = %record.id(), image = %reference, "Created record");
                Ok(record)
            }
            Err(e) => {
                tracing::error!(kind = R::KIND, error = %e, "Failed to create record");
                self.images.discard(&reference).await;
                Err(e.into())
            }
        }
    }

    async fn update(
        &self,
        id: Uuid,
        patch: R::Patch,
        image: Option<ImageUpload>,
    ) -> Result<R, ContentError> {
        // Resolve the record first so an unknown id never costs a file write
        let existing = self.store.find_by_id(id).await?;

        let reference = self.images.store(image).await?;
        let new_image = (!reference.is_empty()).then(|| reference.clone());
        let merged = existing.merge(patch, new_image);

        match self.store.update(id, merged).await {
            Ok(record) => {
                tracing::info!(kind = R::KIND, id = %id, image = %record.image(), "Updated record");
                Ok(record)
            }
            Err(e) => {
                tracing::error!(kind = R::KIND, id = %id, error = %e, "Failed to update record");
                self.images.discard(&reference).await;
                Err(e.into())
            }
        }
    }

    async fn delete(&self, id: Uuid) -> Result<R, ContentError> {
        let removed = self.store.delete_by_id(id).await?;
        // Images are not cascaded; the file stays in the upload directory
        tracing::info!(kind = R::KIND, id = %id, "Deleted record");
        Ok(removed)
    }
}
