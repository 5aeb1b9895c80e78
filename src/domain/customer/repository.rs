use async_trait::async_trait;

use super::value_objects::{Cpf, NewCustomer, StoredCustomer};

// ============================================================================
// Customer Repository Contract
// ============================================================================
//
// Implemented by the backends in `crate::store`. The service depends on this
// trait only.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("cpf is already stored")]
    UniqueViolation,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Result of a lookup by CPF
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpfLookup {
    pub rows: Vec<StoredCustomer>,
    pub row_count: u64,
}

impl CpfLookup {
    pub fn new(rows: Vec<StoredCustomer>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, customer: &NewCustomer) -> Result<(), RepositoryError>;

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<CpfLookup, RepositoryError>;

    /// Rows ordered by id. May return fewer than `limit`.
    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<StoredCustomer>, RepositoryError>;
}
