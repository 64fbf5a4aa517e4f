// ============================================================================
// Resource Store - Persistence Layer
// ============================================================================
//
// The ResourceStore contract plus its two implementations:
// - PgResourceStore  PostgreSQL via sqlx
// - InMemoryStore    process-local, insertion ordered
//
// ============================================================================

pub mod resource_store;
pub mod memory;
pub mod postgres;

pub use resource_store::ResourceStore;
pub use memory::InMemoryStore;
pub use postgres::PgResourceStore;
