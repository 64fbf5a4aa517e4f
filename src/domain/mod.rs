// ============================================================================
// Domain Layer - Site Content
// ============================================================================
//
// One subdirectory per record kind:
// - event         public events (media-bearing)
// - testimonial   visitor testimonials (media-bearing)
// - subscription  newsletter subscriptions and the admission rule
//
// Storage and image handling live in src/resource and src/media.
//
// ============================================================================

pub mod event;
pub mod testimonial;
pub mod subscription;
