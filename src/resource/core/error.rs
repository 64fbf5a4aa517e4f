use uuid::Uuid;

// ============================================================================
// Store Errors
// ============================================================================

/// Failure of a store operation, shared by every record kind
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    /// An update whose record does not carry the id being updated
    pub fn id_mismatch(kind: &'static str, id: Uuid, record_id: Uuid) -> Self {
        Self::Persistence(format!(
            "{} id mismatch: {} updated with record {}",
            kind, id, record_id
        ))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        StoreError::Persistence(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_kind_and_id() {
        let id = Uuid::new_v4();
        let error = StoreError::not_found("Event", id);

        assert!(error.is_not_found());
        assert_eq!(error.to_string(), format!("Event not found: {}", id));
    }

    #[test]
    fn test_sqlx_errors_become_persistence_failures() {
        let error: StoreError = sqlx::Error::PoolTimedOut.into();

        assert!(!error.is_not_found());
        assert!(matches!(error, StoreError::Persistence(_)));
    }
}
