// ============================================================================
// Resource Core - Generic Record Abstractions
// ============================================================================
//
// Nothing in here knows about Events, Testimonials or subscriptions.
//
// ============================================================================

pub mod error;
pub mod record;

pub use error::StoreError;
pub use record::{merge_field, supplied, Content, Record};
