// ============================================================================
// Event Field Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Event {0} cannot be empty")]
    MissingField(&'static str),

    #[error("Invalid event date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
