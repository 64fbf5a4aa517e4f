// ============================================================================
// Testimonial Domain
// ============================================================================

pub mod model;
pub mod commands;
pub mod errors;

pub use model::*;
pub use commands::*;
pub use errors::*;

use crate::resource::ContentCommandHandler;

pub type TestimonialCommandHandler = ContentCommandHandler<Testimonial>;
