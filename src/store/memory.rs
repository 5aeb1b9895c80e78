use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::domain::customer::{
    Cpf, CpfLookup, CustomerRepository, NewCustomer, RepositoryError, StoredCustomer,
};

/// Keeps customers in id order. The duplicate check and the insert happen
/// under one lock, matching the unique constraint of the SQL table.
pub struct InMemoryCustomerRepository {
    state: Mutex<MemoryState>,
}

struct MemoryState {
    next_id: i64,
    rows: BTreeMap<i64, StoredCustomer>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState { next_id: 1, rows: BTreeMap::new() }),
        }
    }

    /// All rows in id order
    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<StoredCustomer> {
        self.state.lock().await.rows.values().cloned().collect()
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert(&self, customer: &NewCustomer) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;

        if state.rows.values().any(|row| row.cpf == customer.cpf.as_str()) {
            return Err(RepositoryError::UniqueViolation);
        }

        let id = state.next_id;
        state.next_id += 1;
        state.rows.insert(
            id,
            StoredCustomer {
                id,
                name: customer.name.clone(),
                cpf: customer.cpf.as_str().to_string(),
                birth_date: customer.birth_date.clone(),
            },
        );

        Ok(())
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<CpfLookup, RepositoryError> {
        let state = self.state.lock().await;
        let rows = state
            .rows
            .values()
            .filter(|row| row.cpf == cpf.as_str())
            .cloned()
            .collect();

        Ok(CpfLookup::new(rows))
    }

    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<StoredCustomer>, RepositoryError> {
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        let state = self.state.lock().await;
        Ok(state.rows.values().skip(skip).take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::cpf::parse_cpf;

    fn customer(name: &str, cpf: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            cpf: parse_cpf(cpf).unwrap(),
            birth_date: "01/01/2000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let repository = InMemoryCustomerRepository::new();
        repository.insert(&customer("Ana", "29332098026")).await.unwrap();
        repository.insert(&customer("Bia", "17408935061")).await.unwrap();

        let rows = repository.snapshot().await;
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_duplicate_cpf_is_a_unique_violation() {
        let repository = InMemoryCustomerRepository::new();
        repository.insert(&customer("Ana", "29332098026")).await.unwrap();

        let result = repository.insert(&customer("Bia", "293.320.980-26")).await;
        assert!(matches!(result, Err(RepositoryError::UniqueViolation)));
    }

    #[tokio::test]
    async fn test_find_by_cpf() {
        let repository = InMemoryCustomerRepository::new();
        repository.insert(&customer("Ana", "29332098026")).await.unwrap();

        let hit = repository.find_by_cpf(&parse_cpf("29332098026").unwrap()).await.unwrap();
        assert_eq!(hit.row_count, 1);
        assert_eq!(hit.rows[0].name, "Ana");

        let miss = repository.find_by_cpf(&parse_cpf("17408935061").unwrap()).await.unwrap();
        assert_eq!(miss.row_count, 0);
        assert!(miss.rows.is_empty());
    }

    #[tokio::test]
    async fn test_find_page_handles_huge_windows() {
        let repository = InMemoryCustomerRepository::new();
        repository.insert(&customer("Ana", "29332098026")).await.unwrap();

        assert_eq!(repository.find_page(i64::MAX, 0).await.unwrap().len(), 1);
        assert!(repository.find_page(10, i64::MAX).await.unwrap().is_empty());
    }
}
