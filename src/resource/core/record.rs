use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Record Abstractions
// ============================================================================
//
// Every persisted kind (Event, Testimonial, EmailSubscription) is a Record:
// built from a draft once the store has assigned its id, identified by that
// id afterwards.
//
// Media-bearing kinds are also Content: they carry an image reference and
// accept partial updates through `merge`.
//
// ============================================================================

/// A record owned by a ResourceStore
pub trait Record: Serialize + Clone + Send + Sync + 'static {
    /// Fields supplied by the caller on creation (everything except the id)
    type Draft: Send + Sync;

    /// Human readable kind, used in errors, logs and metric labels
    const KIND: &'static str;

    /// Build the stored record once the store has assigned an id
    fn from_draft(id: Uuid, draft: Self::Draft) -> Self;

    fn id(&self) -> Uuid;
}

/// A record that carries an uploaded image and supports partial updates
pub trait Content: Record {
    /// Candidate field values for a partial update
    type Patch: Send + Sync;

    /// Set the image reference on a draft before it is persisted
    fn attach_image(draft: &mut Self::Draft, reference: String);

    /// Merge a patch into this record.
    ///
    /// Supplied, non-empty fields win; everything else keeps its current
    /// value. `image` is replaced only when this request stored a new file.
    fn merge(&self, patch: Self::Patch, image: Option<String>) -> Self;

    fn image(&self) -> &str;
}

/// Normalise a candidate field: empty values count as "not supplied".
///
/// The boundary cannot tell an omitted field from one submitted empty, so
/// both leave the stored value untouched.
pub fn supplied(candidate: Option<String>) -> Option<String> {
    candidate.filter(|value| !value.is_empty())
}

/// Replace `current` with the candidate when one was supplied
pub fn merge_field<T: Clone>(current: &T, candidate: Option<T>) -> T {
    candidate.unwrap_or_else(|| current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_drops_empty_values() {
        assert_eq!(supplied(None), None);
        assert_eq!(supplied(Some(String::new())), None);
        assert_eq!(supplied(Some("Gala".to_string())), Some("Gala".to_string()));
    }

    #[test]
    fn test_supplied_keeps_whitespace() {
        // Only the empty string is treated as omitted
        assert_eq!(supplied(Some(" ".to_string())), Some(" ".to_string()));
    }

    #[test]
    fn test_merge_field_prefers_candidate() {
        let current = "old".to_string();

        assert_eq!(merge_field(&current, Some("new".to_string())), "new");
        assert_eq!(merge_field(&current, None), "old");
    }
}
