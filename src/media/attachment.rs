use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::metrics::Metrics;

// ============================================================================
// Image Attachment Handler
// ============================================================================
//
// Persists an uploaded image into the flat upload directory shared by events
// and testimonials, and hands back the reference to store on the record.
//
// - Stored names are generated (`<uuid>.<ext>`); the client filename only
//   contributes its extension, so unrelated uploads never overwrite each other.
// - Bytes go to a hidden temp file first and are renamed into place, so a
//   reference is only returned for a complete file.
// - `discard` removes a file whose record mutation failed afterwards.
//
// ============================================================================

const TEMP_UPLOAD_PREFIX: &str = ".cms-upload-";
const TEMP_UPLOAD_SUFFIX: &str = ".upload";
const MAX_EXTENSION_LEN: usize = 8;

/// An uploaded file as received at the boundary
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to store uploaded image: {0}")]
    Io(#[from] std::io::Error),
}

pub struct ImageAttachmentHandler {
    root: PathBuf,
    metrics: Arc<Metrics>,
}

impl ImageAttachmentHandler {
    pub fn new(root: impl Into<PathBuf>, metrics: Arc<Metrics>) -> Self {
        Self {
            root: root.into(),
            metrics,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it is missing
    pub async fn ensure_root(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Store the upload if there is one.
    ///
    /// Returns the reference to attach, or an empty string when nothing was
    /// uploaded. An error means no file was left behind.
    pub async fn store(&self, upload: Option<ImageUpload>) -> Result<String, MediaError> {
        let Some(upload) = upload else {
            return Ok(String::new());
        };

        let reference = generated_name(&upload.original_filename);
        let temp_path = self
            .root
            .join(format!("{}{}{}", TEMP_UPLOAD_PREFIX, Uuid::new_v4(), TEMP_UPLOAD_SUFFIX));
        let final_path = self.root.join(&reference);

        if let Err(e) = tokio::fs::write(&temp_path, &upload.bytes).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            tracing::error!(error = %e, "Failed to write uploaded image");
            return Err(e.into());
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &final_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            tracing::error!(error = %e, reference = %reference, "Failed to move uploaded image into place");
            return Err(e.into());
        }

        self.metrics.record_upload(upload.bytes.len());
        tracing::info!(
            reference = %reference,
            original = %upload.original_filename,
            bytes = upload.bytes.len(),
            "Stored uploaded image"
        );

        Ok(reference)
    }

    /// Remove a stored image whose record mutation did not go through
    pub async fn discard(&self, reference: &str) {
        if reference.is_empty() {
            return;
        }

        match tokio::fs::remove_file(self.root.join(reference)).await {
            Ok(()) => tracing::info!(reference = %reference, "Discarded orphaned upload"),
            Err(e) => tracing::warn!(error = %e, reference = %reference, "Failed to discard upload"),
        }
    }

    pub fn path_for(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }
}

/// `<uuid>.<ext>`, keeping a short alphanumeric extension from the client name
fn generated_name(original_filename: &str) -> String {
    let extension = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(root: &Path) -> ImageAttachmentHandler {
        ImageAttachmentHandler::new(root, Arc::new(Metrics::new().unwrap()))
    }

    fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            original_filename: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_no_upload_yields_empty_reference() {
        let dir = tempfile::tempdir().unwrap();
        let reference = handler(dir.path()).store(None).await.unwrap();

        assert!(reference.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_store_writes_file_under_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path());

        let reference = handler.store(Some(upload("Poster.PNG", b"png-bytes"))).await.unwrap();

        assert!(reference.ends_with(".png"));
        assert_ne!(reference, "Poster.PNG");
        assert_eq!(std::fs::read(handler.path_for(&reference)).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_same_client_name_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path());

        let first = handler.store(Some(upload("photo.jpg", b"first"))).await.unwrap();
        let second = handler.store(Some(upload("photo.jpg", b"second"))).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(handler.path_for(&first)).unwrap(), b"first");
        assert_eq!(std::fs::read(handler.path_for(&second)).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_write_failure_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let handler = handler(&missing);

        let result = handler.store(Some(upload("photo.jpg", b"bytes"))).await;

        assert!(matches!(result, Err(MediaError::Io(_))));
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn test_discard_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path());
        let reference = handler.store(Some(upload("photo.jpg", b"bytes"))).await.unwrap();

        handler.discard(&reference).await;

        assert!(!handler.path_for(&reference).exists());
    }

    #[test]
    fn test_generated_name_drops_suspicious_extensions() {
        assert!(!generated_name("../../etc/passwd").contains('.'));
        assert!(!generated_name("archive.tar.gz;rm").contains(';'));
        assert!(generated_name("image.jpeg").ends_with(".jpeg"));
        assert!(!generated_name("noextension").contains('.'));
    }
}
