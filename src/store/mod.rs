// ============================================================================
// Customer Store - Repository Backends
// ============================================================================
//
// Concrete implementations of `CustomerRepository`:
// - postgres: `users` table through a sqlx connection pool
// - memory:   process-local map, for local runs and tests
//
// ============================================================================

mod memory;
mod postgres;

pub use memory::InMemoryCustomerRepository;
pub use postgres::PgCustomerRepository;
