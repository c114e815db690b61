//! SQLite-backed patient store.
//!
//! Used as the local default when no `DATABASE_URL` is configured, and as an
//! isolated in-memory store in tests.

use std::str::FromStr;

use async_trait::async_trait;
use patient_register_core::patient::PatientDraft;
use patient_register_core::types::DbId;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::PATIENT_COLUMNS;
use crate::models::patient::Patient;
use crate::store::{PatientStore, StoreError};

const MAX_CONNECTIONS: u32 = 5;

pub struct SqlitePatientStore {
    pool: SqlitePool,
}

impl SqlitePatientStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for a file-backed database, creating the file if needed.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        if database_url.contains(":memory:") {
            return Self::in_memory().await;
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        tracing::info!("Database connection pool created");
        Ok(Self::new(pool))
    }

    /// A private in-memory database with the schema applied.
    ///
    /// The pool holds exactly one connection that never expires; an in-memory
    /// SQLite database lives only as long as its connection.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let store = Self::new(pool);
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create the `patients` table if it does not exist.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PatientStore for SqlitePatientStore {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, StoreError> {
        let query = format!(
            "INSERT INTO patients (name, age, gender, problem, created_at) \
             VALUES (?, ?, ?, ?, ?) \
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
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?");
        let patient = sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(patient)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = ?")
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
