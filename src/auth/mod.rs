// ============================================================================
// Admin Authentication
// ============================================================================
//
// - provider  pluggable credential check (static admin pair by default)
// - session   expiring session tokens
// - gate      login / authorize / logout
//
// ============================================================================

mod gate;
mod provider;
mod session;

pub use gate::{AuthError, AuthGate};
pub use provider::{AuthProvider, Credentials, StaticCredentialProvider};
pub use session::SessionStore;
