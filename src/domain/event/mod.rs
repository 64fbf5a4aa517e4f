// ============================================================================
// Event Domain
// ============================================================================
//
// - Model (Event record, draft, patch and merge rules)
// - Commands (raw request fields into drafts and patches)
// - Errors (EventError)
//
// Persistence and image handling come from the generic resource layer.
//
// ============================================================================

pub mod model;
pub mod commands;
pub mod errors;

pub use model::*;
pub use commands::*;
pub use errors::*;

use crate::resource::ContentCommandHandler;

pub type EventCommandHandler = ContentCommandHandler<Event>;
