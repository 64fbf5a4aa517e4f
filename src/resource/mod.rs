// ============================================================================
// Resource Lifecycle Infrastructure
// ============================================================================
//
// Generic, reusable machinery for records of any kind.
// Kind-specific code is in src/domain/
//
// ============================================================================

pub mod core;
pub mod store;
mod command_handler;

pub use command_handler::{ContentCommand, ContentCommandHandler, ContentError};
