//! Postgres-backed patient store.

use async_trait::async_trait;
use patient_register_core::patient::PatientDraft;
use patient_register_core::types::DbId;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::PATIENT_COLUMNS;
use crate::models::patient::Patient;
use crate::store::{PatientStore, StoreError};

/// Maximum pooled connections per process.
const MAX_CONNECTIONS: u32 = 20;

pub struct PgPatientStore {
    pool: PgPool,
}

impl PgPatientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool to `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        tracing::info!("Database connection pool created");
        Ok(Self::new(pool))
    }

    /// Create the `patients` table if it does not exist.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations/postgres").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PatientStore for PgPatientStore {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, StoreError> {
        let query = format!(
            "INSERT INTO patients (name, age, gender, problem, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PATIENT_COLUMNS}"
        );
        let patient = sqlx::query_as::<_, Patient>(&query)
            .bind(&draft.name)
            .bind(draft.age)
            .bind(&draft.gender)
            .bind(&draft.problem)
            .bind(chrono::Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(patient)
    }

    async fn list_all_descending(&self) -> Result<Vec<Patient>, StoreError> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id DESC");
        let patients = sqlx::query_as::<_, Patient>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(patients)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Patient>, StoreError> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1");
        let patient = sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(patient)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM patients")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
