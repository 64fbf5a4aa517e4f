use crate::resource::core::StoreError;

// ============================================================================
// Subscription Admission Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    #[error("Email address cannot be empty")]
    EmptyAddress,

    #[error("Email address is already subscribed: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubscriptionError {
    /// True for the rejections the guard itself decides (empty or duplicate)
    pub fn is_rejection(&self) -> bool {
        matches!(self, SubscriptionError::EmptyAddress | SubscriptionError::Duplicate(_))
    }
}
