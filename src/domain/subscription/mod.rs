// ============================================================================
// Subscription Domain
// ============================================================================
//
// - Model (EmailSubscription)
// - Guard (admission rule and the atomic store capability it needs)
// - Errors (SubscriptionError)
//
// ============================================================================

pub mod model;
pub mod guard;
pub mod errors;

pub use model::*;
pub use guard::*;
pub use errors::*;
