use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::customer::{
    Cpf, CpfLookup, CustomerRepository, NewCustomer, RepositoryError, StoredCustomer,
};

// ============================================================================
// PostgreSQL Customer Repository
// ============================================================================
//
// Table `users`, one row per customer. `cpf` carries a UNIQUE constraint so
// two concurrent registrations of the same CPF cannot both land, even when
// both pass the service's existence check.
//
// ============================================================================

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    cpf CHAR(11) NOT NULL UNIQUE,
    birth_date TEXT NOT NULL
)";

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Create the `users` table if it is missing
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        tracing::info!("Ensured users table exists");
        Ok(())
    }
}

fn customer_from_row(row: &PgRow) -> Result<StoredCustomer, sqlx::Error> {
    Ok(StoredCustomer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        cpf: row.try_get("cpf")?,
        birth_date: row.try_get("birth_date")?,
    })
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => RepositoryError::UniqueViolation,
            other => RepositoryError::Backend(other.into()),
        }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn insert(&self, customer: &NewCustomer) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO users (name, cpf, birth_date) VALUES ($1, $2, $3)")
            .bind(&customer.name)
            .bind(customer.cpf.as_str())
            .bind(&customer.birth_date)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<CpfLookup, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, cpf, birth_date FROM users WHERE cpf = $1")
            .bind(cpf.as_str())
            .fetch_all(&self.pool)
            .await?;

        let customers = rows
            .iter()
            .map(customer_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CpfLookup::new(customers))
    }

    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<StoredCustomer>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, cpf, birth_date FROM users ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(limit, offset, rows = rows.len(), "Fetched customer page");

        Ok(rows
            .iter()
            .map(customer_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
