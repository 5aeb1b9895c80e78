// ============================================================================
// Customer Domain - Registration and Lookup Rules
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Value objects (Cpf, NewCustomer, StoredCustomer)
// - Validators (CPF checksum, birth date, pagination)
// - Errors (CustomerError enum and its ErrorKind)
// - Repository contract (CustomerRepository)
// - Service (CustomerService)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod cpf;
pub mod birth_date;
pub mod pagination;
pub mod repository;
pub mod service;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use repository::*;
pub use service::*;
