use std::sync::Arc;

use super::birth_date::validate_birth_date;
use super::cpf::{parse_cpf, validate_cpf};
use super::errors::{CustomerError, CUSTOMER_NOT_FOUND, NO_CUSTOMERS_FOUND};
use super::pagination::validate_pagination;
use super::repository::CustomerRepository;
use super::value_objects::{Cpf, CustomerInput, NewCustomer, StoredCustomer};

// ============================================================================
// Customer Service
// ============================================================================
//
// Orchestrates: Validators → Existence check → Repository
//
// Checks run in a fixed order and the first failure aborts the operation:
//   create: CPF shape → already registered? → CPF check digits → birth date → insert
//   get:    CPF shape → lookup
//   list:   page/limit → page query
//
// ============================================================================

#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Register a new customer, storing the CPF in normalized form
    pub async fn create(&self, input: CustomerInput) -> Result<(), CustomerError> {
        let candidate = parse_cpf(&input.cpf)?;
        self.ensure_not_registered(&candidate).await?;

        let cpf = validate_cpf(&input.cpf).inspect_err(|_| {
            tracing::debug!(cpf = %candidate.masked(), "Rejected CPF with invalid check digits");
        })?;
        validate_birth_date(&input.birth_date)?;

        let customer = NewCustomer {
            name: input.name.trim().to_string(),
            cpf,
            birth_date: input.birth_date.trim().to_string(),
        };

        self.repository.insert(&customer).await.map_err(|e| {
            let err = CustomerError::from(e);
            if let CustomerError::Repository(ref source) = err {
                tracing::error!(error = %source, "Failed to insert customer");
            }
            err
        })?;

        tracing::info!(cpf = %customer.cpf.masked(), "✅ Customer registered");
        Ok(())
    }

    /// Look up customers by CPF. The check digits are not verified here.
    pub async fn get_by_cpf(&self, raw_cpf: &str) -> Result<Vec<StoredCustomer>, CustomerError> {
        let cpf = parse_cpf(raw_cpf)?;
        let lookup = self.repository.find_by_cpf(&cpf).await?;

        if lookup.row_count == 0 {
            tracing::info!(cpf = %cpf.masked(), "Customer not found");
            return Err(CustomerError::NotFound(CUSTOMER_NOT_FOUND));
        }

        Ok(lookup.rows)
    }

    pub async fn list_all(&self, page: i64, limit: i64) -> Result<Vec<StoredCustomer>, CustomerError> {
        let page = validate_pagination(page, limit)?;
        let customers = self.repository.find_page(page.limit, page.offset()).await?;

        tracing::debug!(
            page = page.page,
            limit = page.limit,
            returned = customers.len(),
            "Listed customers"
        );

        if customers.is_empty() {
            return Err(CustomerError::NotFound(NO_CUSTOMERS_FOUND));
        }

        Ok(customers)
    }

    async fn ensure_not_registered(&self, cpf: &Cpf) -> Result<(), CustomerError> {
        let lookup = self.repository.find_by_cpf(cpf).await?;

        if lookup.row_count > 0 {
            tracing::info!(cpf = %cpf.masked(), "Customer already registered");
            return Err(CustomerError::Conflict);
        }

        Ok(())
    }
}
