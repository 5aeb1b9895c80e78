// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains the customer registration rules. Each aggregate has
// its own subdirectory with:
// - Value objects
// - Validators
// - Errors
// - Repository contract
// - Service orchestrating the above
//
// This layer knows nothing about HTTP or SQL.
//
// ============================================================================

pub mod customer;
