//! The record store gateway contract.

use async_trait::async_trait;
use patient_register_core::patient::PatientDraft;
use patient_register_core::types::DbId;

use crate::models::patient::Patient;

/// A failure of the backing store itself.
///
/// A missing record is never a `StoreError`: lookups return `Ok(None)` and
/// deletes return `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations for patient records.
///
/// Every mutating call is a single statement, so each one commits (or fails)
/// on its own. Consistency between concurrent callers is the database's job.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Insert a new record and return it with its assigned id.
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, StoreError>;

    /// Every record, newest (highest id) first.
    async fn list_all_descending(&self) -> Result<Vec<Patient>, StoreError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<Patient>, StoreError>;

    /// Delete a record. Returns `false` if no row had that id.
    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Round-trip a trivial query to confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Stand-in gateway used when the store could not be opened at startup.
///
/// Every operation fails immediately with [`StoreError::Unavailable`] so
/// requests report the outage instead of attempting doomed queries.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl PatientStore for UnavailableStore {
    async fn create(&self, _draft: &PatientDraft) -> Result<Patient, StoreError> {
        Err(self.error())
    }

    async fn list_all_descending(&self) -> Result<Vec<Patient>, StoreError> {
        Err(self.error())
    }

    async fn get_by_id(&self, _id: DbId) -> Result<Option<Patient>, StoreError> {
        Err(self.error())
    }

    async fn delete_by_id(&self, _id: DbId) -> Result<bool, StoreError> {
        Err(self.error())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = UnavailableStore::new("connection refused");
        let draft = PatientDraft {
            name: "A".into(),
            age: 1,
            gender: "—".into(),
            problem: "x".into(),
        };

        assert_matches!(store.create(&draft).await, Err(StoreError::Unavailable(r)) if r == "connection refused");
        assert_matches!(store.list_all_descending().await, Err(StoreError::Unavailable(_)));
        assert_matches!(store.get_by_id(1).await, Err(StoreError::Unavailable(_)));
        assert_matches!(store.delete_by_id(1).await, Err(StoreError::Unavailable(_)));
        assert_matches!(store.count().await, Err(StoreError::Unavailable(_)));
        assert_matches!(store.ping().await, Err(StoreError::Unavailable(_)));
    }
}
